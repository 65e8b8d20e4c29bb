use std::sync::atomic::{AtomicU64, Ordering};

use crate::WorkerPhase;

/// Snapshot of one dispatcher's activity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatcherStats {
	/// Worker phase at snapshot time.
	pub phase: WorkerPhase,
	/// Generation of the most recently spawned worker, 0 if none yet.
	pub generation: u64,
	/// `filter()` calls accepted.
	pub submitted: u64,
	/// Requests discarded before they started.
	pub superseded: u64,
	/// Computations run on a worker.
	pub executed: u64,
	/// Computations that errored or panicked.
	pub failed: u64,
	/// Results published on the foreground.
	pub delivered: u64,
	/// Worker threads spawned.
	pub spawned: u64,
	/// Worker threads torn down after idling.
	pub teardowns: u64,
}

#[derive(Debug, Default)]
pub(crate) struct StatCounters {
	pub(crate) submitted: AtomicU64,
	pub(crate) superseded: AtomicU64,
	pub(crate) executed: AtomicU64,
	pub(crate) failed: AtomicU64,
	pub(crate) delivered: AtomicU64,
	pub(crate) spawned: AtomicU64,
	pub(crate) teardowns: AtomicU64,
}

/// Increments `counter`, returning the new value.
pub(crate) fn bump(counter: &AtomicU64) -> u64 {
	counter.fetch_add(1, Ordering::AcqRel).wrapping_add(1)
}

impl StatCounters {
	pub(crate) fn snapshot(&self, phase: WorkerPhase, generation: u64) -> DispatcherStats {
		DispatcherStats {
			phase,
			generation,
			submitted: self.submitted.load(Ordering::Acquire),
			superseded: self.superseded.load(Ordering::Acquire),
			executed: self.executed.load(Ordering::Acquire),
			failed: self.failed.load(Ordering::Acquire),
			delivered: self.delivered.load(Ordering::Acquire),
			spawned: self.spawned.load(Ordering::Acquire),
			teardowns: self.teardowns.load(Ordering::Acquire),
		}
	}
}
