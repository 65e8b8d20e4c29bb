use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

use parking_lot::Mutex;
use pretty_assertions::assert_eq;
use sift_filter::{DispatcherConfig, FilterDispatcher, ForegroundLoop, foreground};
use sift_numbers::{NumberFilter, NumberList};

const WAIT: Duration = Duration::from_secs(5);

async fn pump_until(fg: &mut ForegroundLoop, cond: impl Fn() -> bool) {
	while !cond() {
		let open = tokio::time::timeout(WAIT, fg.turn()).await.expect("foreground delivery timed out");
		assert!(open, "foreground closed while waiting");
	}
}

fn dispatcher(data: &[i64]) -> (Arc<NumberList>, FilterDispatcher<Arc<NumberList>>, ForegroundLoop) {
	let list = Arc::new(NumberList::new(data.to_vec()));
	let (port, fg) = foreground();
	let config = DispatcherConfig::default().with_idle_timeout(Duration::from_millis(100));
	(Arc::clone(&list), FilterDispatcher::with_config(list, port, config), fg)
}

#[tokio::test]
async fn even_filter_keeps_zero() {
	let (list, dispatcher, mut fg) = dispatcher(&[-2, -1, 0, 1, 2]);
	let reported = Arc::new(AtomicI64::new(i64::MIN));
	let sink = Arc::clone(&reported);

	dispatcher.filter_with_listener(NumberFilter::Even, move |count| sink.store(count, Ordering::SeqCst));
	pump_until(&mut fg, || reported.load(Ordering::SeqCst) != i64::MIN).await;

	assert_eq!(reported.load(Ordering::SeqCst), 3);
	assert_eq!(*list.displayed(), vec![-2, 0, 2]);
	assert_eq!(list.version(), 1);
}

#[tokio::test]
async fn all_restores_full_list_after_narrowing() {
	let data = [5, -3, 8, 0, -12, 7];
	let (list, dispatcher, mut fg) = dispatcher(&data);

	dispatcher.filter(NumberFilter::Negative);
	pump_until(&mut fg, || list.version() == 1).await;
	assert_eq!(*list.displayed(), vec![-3, -12]);

	dispatcher.filter(NumberFilter::All);
	pump_until(&mut fg, || list.version() == 2).await;
	assert_eq!(*list.displayed(), data.to_vec());
	assert_eq!(list.count(), data.len());
}

#[tokio::test]
async fn listener_sees_published_view() {
	let (list, dispatcher, mut fg) = dispatcher(&[1, 2, 3, 4]);
	let observed = Arc::new(Mutex::new(None));
	let sink = Arc::clone(&observed);
	let view = Arc::clone(&list);

	dispatcher.filter_with_listener(NumberFilter::Odd, move |count| {
		*sink.lock() = Some((count, view.displayed().to_vec()));
	});
	pump_until(&mut fg, || observed.lock().is_some()).await;

	assert_eq!(observed.lock().clone(), Some((2, vec![1, 3])));
}

#[tokio::test]
async fn empty_list_reports_zero() {
	let (list, dispatcher, mut fg) = dispatcher(&[]);
	let reported = Arc::new(AtomicI64::new(i64::MIN));
	let sink = Arc::clone(&reported);

	dispatcher.filter_with_listener(NumberFilter::Positive, move |count| sink.store(count, Ordering::SeqCst));
	pump_until(&mut fg, || reported.load(Ordering::SeqCst) != i64::MIN).await;

	assert_eq!(reported.load(Ordering::SeqCst), 0);
	assert!(list.displayed().is_empty());
}

#[tokio::test]
async fn worker_respawns_after_idle_teardown() {
	let (list, dispatcher, mut fg) = dispatcher(&[1, 2, 3]);

	dispatcher.filter(NumberFilter::Even);
	pump_until(&mut fg, || list.version() == 1).await;

	let deadline = tokio::time::Instant::now() + WAIT;
	while dispatcher.is_worker_alive() {
		assert!(tokio::time::Instant::now() < deadline, "worker never tore down");
		tokio::time::sleep(Duration::from_millis(10)).await;
	}

	dispatcher.filter(NumberFilter::Odd);
	pump_until(&mut fg, || list.version() == 2).await;
	assert_eq!(*list.displayed(), vec![1, 3]);
	assert_eq!(dispatcher.stats().spawned, 2);
}
