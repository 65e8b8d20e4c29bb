/// Count reported to a listener when its request reached delivery without results.
pub const NO_RESULTS: i64 = -1;

/// Output of one filtering pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterResults<T> {
	/// Number of values the pass produced.
	pub count: usize,
	/// The filtered values. `None` means the provider kept no values, and
	/// publishers usually fall back to their unfiltered data.
	pub values: Option<Vec<T>>,
}

impl<T> FilterResults<T> {
	/// Zero results and no values. Failed computations are normalized to this.
	pub const fn empty() -> Self {
		Self { count: 0, values: None }
	}

	/// Wraps `values`, taking `count` from its length.
	pub fn from_values(values: Vec<T>) -> Self {
		Self {
			count: values.len(),
			values: Some(values),
		}
	}

	pub fn is_empty(&self) -> bool {
		self.count == 0
	}
}

impl<T> Default for FilterResults<T> {
	fn default() -> Self {
		Self::empty()
	}
}

impl<T> From<Vec<T>> for FilterResults<T> {
	fn from(values: Vec<T>) -> Self {
		Self::from_values(values)
	}
}

/// Completion callback for one filtering request.
///
/// Invoked on the foreground context after results were published. A request
/// superseded before it ran never notifies its listener.
pub trait FilterListener: Send + 'static {
	fn on_filter_complete(&self, count: i64);
}

impl<F> FilterListener for F
where
	F: Fn(i64) + Send + 'static,
{
	fn on_filter_complete(&self, count: i64) {
		self(count)
	}
}

/// One `filter()` call travelling from the caller to the foreground.
///
/// Ownership moves linearly: request slot, worker (fills `results`), then the
/// deliverer, which consumes it.
pub(crate) struct FilterRequest<E, T> {
	pub(crate) seq: u64,
	pub(crate) constraint: E,
	pub(crate) listener: Option<Box<dyn FilterListener>>,
	pub(crate) results: Option<FilterResults<T>>,
}

impl<E, T> FilterRequest<E, T> {
	pub(crate) fn new(seq: u64, constraint: E, listener: Option<Box<dyn FilterListener>>) -> Self {
		Self {
			seq,
			constraint,
			listener,
			results: None,
		}
	}

	/// Count handed to the listener.
	pub(crate) fn completion_count(&self) -> i64 {
		self.results
			.as_ref()
			.map_or(NO_RESULTS, |results| i64::try_from(results.count).unwrap_or(i64::MAX))
	}
}
