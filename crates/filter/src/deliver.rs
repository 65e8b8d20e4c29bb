use std::sync::Arc;

use crate::dispatcher::Request;
use crate::request::FilterRequest;
use crate::stats::{StatCounters, bump};
use crate::{Filter, Foreground};

/// Hands completed requests from the worker thread to the foreground.
pub(crate) struct ResultDeliverer<F: Filter> {
	filter: Arc<F>,
	foreground: Arc<dyn Foreground>,
	stats: Arc<StatCounters>,
}

impl<F: Filter> ResultDeliverer<F> {
	pub(crate) fn new(filter: Arc<F>, foreground: Arc<dyn Foreground>, stats: Arc<StatCounters>) -> Self {
		Self { filter, foreground, stats }
	}

	/// Posts `request` to the foreground. Called from the worker thread.
	pub(crate) fn deliver(&self, request: Request<F>) {
		let seq = request.seq;
		let filter = Arc::clone(&self.filter);
		let stats = Arc::clone(&self.stats);
		let posted = self.foreground.post(Box::new(move || {
			publish(&*filter, request);
			bump(&stats.delivered);
		}));
		if let Err(err) = posted {
			tracing::warn!(request = seq, error = %err, "filter.deliver.dropped");
		}
	}
}

/// Publishes, then notifies. Runs on the foreground.
fn publish<F: Filter>(filter: &F, request: Request<F>) {
	let count = request.completion_count();
	let FilterRequest {
		seq,
		constraint,
		listener,
		results,
	} = request;

	filter.publish_results(constraint, results.unwrap_or_default());
	if let Some(listener) = listener {
		listener.on_filter_complete(count);
	}
	tracing::trace!(request = seq, count, "filter.deliver.published");
}
