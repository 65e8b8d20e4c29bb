use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic generation clock for the worker threads of one dispatcher.
#[derive(Debug, Default)]
pub(crate) struct GenerationClock {
	last: AtomicU64,
}

impl GenerationClock {
	/// Creates a clock whose first generation is 1.
	pub(crate) fn new() -> Self {
		Self::default()
	}

	/// Returns the next generation ID.
	pub(crate) fn next(&self) -> u64 {
		self.last.fetch_add(1, Ordering::AcqRel).wrapping_add(1)
	}

	/// Returns the most recently issued generation, or 0 if none.
	pub(crate) fn current(&self) -> u64 {
		self.last.load(Ordering::Acquire)
	}
}

#[cfg(test)]
mod tests {
	use super::GenerationClock;

	#[test]
	fn generations_start_at_one_and_increase() {
		let clock = GenerationClock::new();
		assert_eq!(clock.current(), 0);
		assert_eq!(clock.next(), 1);
		assert_eq!(clock.next(), 2);
		assert_eq!(clock.current(), 2);
	}
}
