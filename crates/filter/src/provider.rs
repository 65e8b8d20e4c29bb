use std::sync::Arc;

use crate::{FilterError, FilterResults};

/// Computation provider driven by a [`FilterDispatcher`](crate::FilterDispatcher).
///
/// `perform_filtering` runs on the dispatcher's worker thread and
/// `publish_results` on the foreground context, so implementations share
/// their state across both through interior mutability.
pub trait Filter: Send + Sync + 'static {
	/// What to filter by. Opaque to the dispatcher.
	type Constraint: Send + 'static;
	/// Element type of the produced values.
	type Item: Send + 'static;

	/// Computes the results for `constraint` on the worker thread.
	///
	/// Contract: the provider's "no filter" constraint must restore the full,
	/// unfiltered data set.
	///
	/// Errors and panics are caught by the worker, logged, and published as
	/// [`FilterResults::empty`].
	fn perform_filtering(&self, constraint: &Self::Constraint) -> Result<FilterResults<Self::Item>, FilterError>;

	/// Applies computed results on the foreground context.
	///
	/// Runs before the request's listener is notified.
	fn publish_results(&self, constraint: Self::Constraint, results: FilterResults<Self::Item>);
}

impl<F> Filter for Arc<F>
where
	F: Filter,
{
	type Constraint = F::Constraint;
	type Item = F::Item;

	fn perform_filtering(&self, constraint: &Self::Constraint) -> Result<FilterResults<Self::Item>, FilterError> {
		(**self).perform_filtering(constraint)
	}

	fn publish_results(&self, constraint: Self::Constraint, results: FilterResults<Self::Item>) {
		(**self).publish_results(constraint, results)
	}
}
