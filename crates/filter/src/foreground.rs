use std::sync::Arc;

use thiserror::Error;
use tokio::sync::mpsc;

/// Unit of work posted to the foreground context.
pub type ForegroundTask = Box<dyn FnOnce() + Send + 'static>;

/// The foreground context no longer accepts tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("foreground loop closed")]
pub struct ForegroundClosed;

/// Serial executor that results are delivered on.
///
/// Supplied by the embedding environment. Tasks posted through one
/// `Foreground` must run one at a time, in posting order.
pub trait Foreground: Send + Sync + 'static {
	fn post(&self, task: ForegroundTask) -> Result<(), ForegroundClosed>;
}

impl<T> Foreground for Arc<T>
where
	T: Foreground + ?Sized,
{
	fn post(&self, task: ForegroundTask) -> Result<(), ForegroundClosed> {
		(**self).post(task)
	}
}

/// Creates a channel-backed foreground: ports post, the loop runs.
///
/// The thread or task that drives the [`ForegroundLoop`] is the foreground
/// context.
pub fn foreground() -> (ForegroundPort, ForegroundLoop) {
	let (tx, rx) = mpsc::unbounded_channel();
	(ForegroundPort { tx }, ForegroundLoop { rx })
}

/// Cloneable posting side of [`foreground`].
#[derive(Clone)]
pub struct ForegroundPort {
	tx: mpsc::UnboundedSender<ForegroundTask>,
}

impl Foreground for ForegroundPort {
	fn post(&self, task: ForegroundTask) -> Result<(), ForegroundClosed> {
		self.tx.send(task).map_err(|_| ForegroundClosed)
	}
}

/// Running side of [`foreground`].
///
/// A dispatcher keeps its port alive, so [`Self::turn`] only reports closure
/// once every dispatcher and worker using it is gone.
pub struct ForegroundLoop {
	rx: mpsc::UnboundedReceiver<ForegroundTask>,
}

impl ForegroundLoop {
	/// Waits for the next task and runs it. Returns `false` once all ports are dropped.
	pub async fn turn(&mut self) -> bool {
		match self.rx.recv().await {
			Some(task) => {
				task();
				true
			}
			None => false,
		}
	}

	/// Runs every task that is ready now, without waiting. Returns how many ran.
	pub fn run_pending(&mut self) -> usize {
		let mut ran = 0;
		while let Ok(task) = self.rx.try_recv() {
			task();
			ran += 1;
		}
		ran
	}

	/// Runs tasks until all ports are dropped.
	pub async fn run(mut self) {
		while self.turn().await {}
	}
}

#[cfg(test)]
mod tests {
	use std::sync::atomic::{AtomicUsize, Ordering};

	use super::*;

	#[tokio::test]
	async fn tasks_run_in_posting_order() {
		let (port, mut fg) = foreground();
		let seen = Arc::new(parking_lot::Mutex::new(Vec::new()));
		for i in 0..4 {
			let seen = Arc::clone(&seen);
			port.post(Box::new(move || seen.lock().push(i))).unwrap();
		}

		assert_eq!(fg.run_pending(), 4);
		assert_eq!(*seen.lock(), vec![0, 1, 2, 3]);
		assert_eq!(fg.run_pending(), 0);
	}

	#[tokio::test]
	async fn turn_reports_closure_after_ports_drop() {
		let (port, mut fg) = foreground();
		let ran = Arc::new(AtomicUsize::new(0));
		let counter = Arc::clone(&ran);
		port.post(Box::new(move || {
			counter.fetch_add(1, Ordering::SeqCst);
		}))
		.unwrap();
		drop(port);

		assert!(fg.turn().await);
		assert!(!fg.turn().await);
		assert_eq!(ran.load(Ordering::SeqCst), 1);
	}

	#[tokio::test]
	async fn post_after_loop_drop_is_closed() {
		let (port, fg) = foreground();
		drop(fg);
		assert_eq!(port.post(Box::new(|| {})), Err(ForegroundClosed));
	}

	#[tokio::test]
	async fn shared_port_posts_through_arc() {
		let (port, mut fg) = foreground();
		let shared: Arc<dyn Foreground> = Arc::new(port);
		shared.post(Box::new(|| {})).unwrap();
		assert_eq!(fg.run_pending(), 1);
	}
}
