//! Worker thread lifecycle.
//!
//! One dedicated thread per dispatcher, spawned on demand by `filter()` and
//! exiting on its own once its idle deadline passes without a new request:
//!
//! ```text
//! Absent -> Created -> Executing -> Armed -> Absent
//!                          ^          |
//!                          +----------+  (request arrives before the deadline)
//! ```

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Instant;

use parking_lot::MutexGuard;

use crate::dispatcher::{Request, Shared, State};
use crate::panic::panic_message;
use crate::stats::bump;
use crate::{Filter, FilterError, FilterResults};

/// Observable phase of a dispatcher's worker thread.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum WorkerPhase {
	/// No worker thread exists.
	#[default]
	Absent,
	/// Thread spawned, first request not yet picked up.
	Created,
	/// A computation is running.
	Executing,
	/// Idle, with a teardown deadline armed.
	Armed,
}

impl WorkerPhase {
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Absent => "absent",
			Self::Created => "created",
			Self::Executing => "executing",
			Self::Armed => "armed",
		}
	}
}

/// Handle to the live worker thread of one dispatcher.
pub(crate) struct WorkerHandle {
	generation: u64,
	spawned_at: Instant,
	_thread: JoinHandle<()>,
}

impl WorkerHandle {
	pub(crate) fn generation(&self) -> u64 {
		self.generation
	}
}

/// Spawns a new worker thread and records its handle in `state`.
///
/// Must be called with the state lock held and no worker present.
pub(crate) fn spawn<F: Filter>(shared: &Arc<Shared<F>>, state: &mut State<F>) -> std::io::Result<()> {
	debug_assert!(state.worker.is_none(), "worker already alive");
	let generation = shared.clock.next();
	let name = format!("{}-{generation}", shared.config.thread_name());
	tracing::trace!(thread = %name, generation, "filter.worker.spawn");

	let task_shared = Arc::clone(shared);
	let thread = std::thread::Builder::new().name(name).spawn(move || run(task_shared, generation))?;

	state.worker = Some(WorkerHandle {
		generation,
		spawned_at: Instant::now(),
		_thread: thread,
	});
	state.phase = WorkerPhase::Created;
	bump(&shared.stats.spawned);
	Ok(())
}

/// Serial loop of one worker generation.
fn run<F: Filter>(shared: Arc<Shared<F>>, generation: u64) {
	let mut state = shared.state.lock();
	loop {
		if let Some(mut request) = state.slot.take() {
			state.phase = WorkerPhase::Executing;
			MutexGuard::unlocked(&mut state, || {
				execute(&*shared, &mut request, generation);
				shared.deliverer.deliver(request);
			});

			// A request that arrived mid-computation runs next instead.
			if !state.slot.is_pending() {
				// An idle timeout past the end of time never tears down.
				if let Some(deadline) = Instant::now().checked_add(shared.config.idle_timeout()) {
					state.slot.arm_teardown(deadline);
				}
				state.phase = WorkerPhase::Armed;
				tracing::trace!(generation, idle_ms = shared.config.idle_timeout().as_millis(), "filter.worker.armed");
			}
			continue;
		}

		match state.slot.teardown_deadline() {
			Some(deadline) if Instant::now() >= deadline => {
				let handle = state.worker.take();
				state.phase = WorkerPhase::Absent;
				drop(state);
				bump(&shared.stats.teardowns);
				let lifetime_ms = handle.map_or(0, |h| h.spawned_at.elapsed().as_millis());
				tracing::debug!(generation, lifetime_ms, "filter.worker.teardown");
				return;
			}
			Some(deadline) => {
				let _ = shared.wake.wait_until(&mut state, deadline);
			}
			None => shared.wake.wait(&mut state),
		}
	}
}

/// Runs the computation, normalizing errors and panics to empty results.
fn execute<F: Filter>(shared: &Shared<F>, request: &mut Request<F>, generation: u64) {
	let started = Instant::now();
	let outcome = panic::catch_unwind(AssertUnwindSafe(|| shared.filter.perform_filtering(&request.constraint)))
		.unwrap_or_else(|payload| Err(FilterError::Panicked(panic_message(&*payload))));
	bump(&shared.stats.executed);

	let results = match outcome {
		Ok(results) => results,
		Err(err) => {
			bump(&shared.stats.failed);
			tracing::warn!(generation, request = request.seq, error = %err, "filter.worker.perform_failed");
			FilterResults::empty()
		}
	};
	tracing::trace!(
		generation,
		request = request.seq,
		count = results.count,
		elapsed_us = started.elapsed().as_micros(),
		"filter.worker.performed"
	);
	request.results = Some(results);
}

#[cfg(test)]
mod tests {
	use super::WorkerPhase;

	#[test]
	fn phase_defaults_to_absent() {
		assert_eq!(WorkerPhase::default(), WorkerPhase::Absent);
		assert_eq!(WorkerPhase::Armed.as_str(), "armed");
	}
}
