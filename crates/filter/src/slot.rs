use std::time::Instant;

/// Outcome from placing a request in the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SlotOutcome {
	/// The slot was empty.
	Enqueued,
	/// A request that had not started yet was discarded.
	Superseded,
}

/// Capacity-1 latest-wins slot feeding one worker thread.
///
/// Holds at most one not-yet-started request plus the worker's armed teardown
/// deadline. Every access happens under the dispatcher's state lock, which is
/// what makes replace-and-disarm a single atomic step.
#[derive(Debug)]
pub(crate) struct RequestSlot<T> {
	pending: Option<T>,
	teardown_at: Option<Instant>,
}

impl<T> RequestSlot<T> {
	pub(crate) const fn new() -> Self {
		Self {
			pending: None,
			teardown_at: None,
		}
	}

	/// Replaces any pending request with `request` and cancels an armed teardown.
	///
	/// The displaced request is dropped together with its listener.
	pub(crate) fn replace(&mut self, request: T) -> SlotOutcome {
		self.teardown_at = None;
		if self.pending.replace(request).is_some() {
			SlotOutcome::Superseded
		} else {
			SlotOutcome::Enqueued
		}
	}

	/// Takes the pending request for execution.
	pub(crate) fn take(&mut self) -> Option<T> {
		self.pending.take()
	}

	pub(crate) fn is_pending(&self) -> bool {
		self.pending.is_some()
	}

	/// Arms the idle teardown deadline.
	pub(crate) fn arm_teardown(&mut self, deadline: Instant) {
		self.teardown_at = Some(deadline);
	}

	pub(crate) fn teardown_deadline(&self) -> Option<Instant> {
		self.teardown_at
	}
}

impl<T> Default for RequestSlot<T> {
	fn default() -> Self {
		Self::new()
	}
}
