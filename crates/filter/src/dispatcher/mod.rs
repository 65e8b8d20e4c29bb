use std::sync::Arc;

use parking_lot::{Condvar, Mutex};

use crate::deliver::ResultDeliverer;
use crate::request::FilterRequest;
use crate::slot::{RequestSlot, SlotOutcome};
use crate::stats::{StatCounters, bump};
use crate::token::GenerationClock;
use crate::worker::{self, WorkerHandle};
use crate::{DispatcherConfig, DispatcherStats, Filter, FilterListener, Foreground, WorkerPhase};

pub(crate) type Request<F> = FilterRequest<<F as Filter>::Constraint, <F as Filter>::Item>;

/// Everything guarded by the dispatcher lock.
pub(crate) struct State<F: Filter> {
	pub(crate) worker: Option<WorkerHandle>,
	pub(crate) slot: RequestSlot<Request<F>>,
	pub(crate) phase: WorkerPhase,
}

/// State shared between the dispatcher handle and its worker thread.
pub(crate) struct Shared<F: Filter> {
	pub(crate) filter: Arc<F>,
	pub(crate) config: DispatcherConfig,
	pub(crate) deliverer: ResultDeliverer<F>,
	pub(crate) state: Mutex<State<F>>,
	pub(crate) wake: Condvar,
	pub(crate) clock: GenerationClock,
	pub(crate) stats: Arc<StatCounters>,
}

/// Runs a [`Filter`] on a lazily spawned worker thread, latest request wins.
///
/// * `filter()` never waits on the computation. It replaces whatever request
///   is still pending, so a burst of calls runs only the last constraint.
/// * A computation already running is never interrupted. A newer request
///   runs right after it.
/// * Results are published, and listeners notified, on the [`Foreground`]
///   given at construction.
/// * The worker thread exits after [`DispatcherConfig::idle_timeout`] without
///   requests and is respawned by the next `filter()` call.
///
/// There is no shutdown call. Dropping the dispatcher lets a live worker
/// finish queued work and exit after its idle window.
pub struct FilterDispatcher<F: Filter> {
	shared: Arc<Shared<F>>,
}

impl<F: Filter> FilterDispatcher<F> {
	/// Creates a dispatcher with the default configuration.
	pub fn new(filter: F, foreground: impl Foreground) -> Self {
		Self::with_config(filter, foreground, DispatcherConfig::default())
	}

	/// Creates a dispatcher. No thread is spawned until the first request.
	pub fn with_config(filter: F, foreground: impl Foreground, config: DispatcherConfig) -> Self {
		let filter = Arc::new(filter);
		let stats = Arc::new(StatCounters::default());
		let deliverer = ResultDeliverer::new(Arc::clone(&filter), Arc::new(foreground), Arc::clone(&stats));
		Self {
			shared: Arc::new(Shared {
				filter,
				config,
				deliverer,
				state: Mutex::new(State {
					worker: None,
					slot: RequestSlot::new(),
					phase: WorkerPhase::Absent,
				}),
				wake: Condvar::new(),
				clock: GenerationClock::new(),
				stats,
			}),
		}
	}

	/// Requests filtering by `constraint`, superseding any pending request.
	pub fn filter(&self, constraint: F::Constraint) {
		self.submit(constraint, None);
	}

	/// Like [`Self::filter`], notifying `listener` once results are published.
	///
	/// The listener is dropped without a call if the request is superseded.
	pub fn filter_with_listener(&self, constraint: F::Constraint, listener: impl FilterListener) {
		self.submit(constraint, Some(Box::new(listener)));
	}

	fn submit(&self, constraint: F::Constraint, listener: Option<Box<dyn FilterListener>>) {
		let seq = bump(&self.shared.stats.submitted);
		let request = FilterRequest::new(seq, constraint, listener);

		let mut state = self.shared.state.lock();
		if state.worker.is_none() {
			if let Err(err) = worker::spawn(&self.shared, &mut state) {
				tracing::error!(request = seq, error = %err, "filter.dispatch.spawn_failed");
				return;
			}
		}
		if state.slot.replace(request) == SlotOutcome::Superseded {
			bump(&self.shared.stats.superseded);
			tracing::trace!(request = seq, "filter.dispatch.superseded");
		}
		self.shared.wake.notify_one();
	}

	/// Current worker phase.
	pub fn phase(&self) -> WorkerPhase {
		self.shared.state.lock().phase
	}

	pub fn is_worker_alive(&self) -> bool {
		self.shared.state.lock().worker.is_some()
	}

	/// Generation of the live worker, if any.
	pub fn worker_generation(&self) -> Option<u64> {
		self.shared.state.lock().worker.as_ref().map(WorkerHandle::generation)
	}

	/// Snapshot of counters and the current phase.
	pub fn stats(&self) -> DispatcherStats {
		let phase = self.phase();
		self.shared.stats.snapshot(phase, self.shared.clock.current())
	}

	pub fn config(&self) -> &DispatcherConfig {
		&self.shared.config
	}

	/// The computation provider.
	pub fn provider(&self) -> &F {
		&self.shared.filter
	}
}

impl<F: Filter> std::fmt::Debug for FilterDispatcher<F> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("FilterDispatcher")
			.field("phase", &self.phase())
			.field("config", &self.shared.config)
			.finish_non_exhaustive()
	}
}
