use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use arc_swap::ArcSwap;
use sift_filter::{Filter, FilterError, FilterResults};

use crate::NumberFilter;

/// A fixed list of integers and the currently displayed subset.
///
/// The full data never changes. Publishing swaps in a new displayed view and
/// bumps [`Self::version`], which observers poll the way a list view reacts
/// to a data-set-changed notification.
pub struct NumberList {
	data: Arc<[i64]>,
	displayed: ArcSwap<Vec<i64>>,
	version: AtomicU64,
}

impl NumberList {
	pub fn new(data: impl Into<Vec<i64>>) -> Self {
		let data: Vec<i64> = data.into();
		Self {
			displayed: ArcSwap::from_pointee(data.clone()),
			data: data.into(),
			version: AtomicU64::new(0),
		}
	}

	/// The full, unfiltered data.
	pub fn data(&self) -> &[i64] {
		&self.data
	}

	/// The currently displayed items.
	pub fn displayed(&self) -> Arc<Vec<i64>> {
		self.displayed.load_full()
	}

	/// Number of displayed items.
	pub fn count(&self) -> usize {
		self.displayed.load().len()
	}

	/// Displayed item at `position`.
	pub fn item(&self, position: usize) -> Option<i64> {
		self.displayed.load().get(position).copied()
	}

	/// Number of publishes so far.
	pub fn version(&self) -> u64 {
		self.version.load(Ordering::Acquire)
	}
}

impl Filter for NumberList {
	type Constraint = NumberFilter;
	type Item = i64;

	fn perform_filtering(&self, constraint: &NumberFilter) -> Result<FilterResults<i64>, FilterError> {
		if self.data.is_empty() {
			return Ok(FilterResults::empty());
		}
		if *constraint == NumberFilter::All {
			return Ok(FilterResults::from_values(self.data.to_vec()));
		}
		let filtered = self.data.iter().copied().filter(|&value| constraint.matches(value)).collect();
		Ok(FilterResults::from_values(filtered))
	}

	fn publish_results(&self, constraint: NumberFilter, results: FilterResults<i64>) {
		let view = results.values.unwrap_or_else(|| self.data.to_vec());
		let count = view.len();
		self.displayed.store(Arc::new(view));
		let version = self.version.fetch_add(1, Ordering::AcqRel).wrapping_add(1);
		tracing::debug!(filter = %constraint, count, version, "numbers.published");
	}
}
