//! Command-line demo of coalesced list filtering.
//!
//! Every `--filter` is submitted back to back, so only the first (already
//! running) and the last request are computed. The displayed list after the
//! last one is printed.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, bail};
use clap::Parser;
use sift_filter::{DispatcherConfig, FilterDispatcher, foreground};
use sift_numbers::{NumberFilter, NumberList};
use tokio::sync::mpsc;
use tracing::info;

/// Demo command line arguments.
#[derive(Parser, Debug)]
#[command(name = "sift-demo")]
#[command(about = "Filter a list of integers on a coalescing background worker")]
struct Args {
	/// Comma-separated integers to filter
	#[arg(short, long, value_delimiter = ',', allow_negative_numbers = true, default_values_t = [-2, -1, 0, 1, 2])]
	data: Vec<i64>,

	/// Filter to apply; repeat to submit a burst
	#[arg(short, long = "filter", value_name = "FILTER", value_enum, ignore_case = true, default_values_t = [NumberFilter::All])]
	filters: Vec<NumberFilter>,

	/// Worker idle timeout in milliseconds, overriding the config file
	#[arg(long, value_name = "MS")]
	idle_timeout_ms: Option<u64>,

	/// TOML dispatcher config
	#[arg(short, long, value_name = "PATH")]
	config: Option<PathBuf>,

	/// Verbose logging
	#[arg(short, long)]
	verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
	let args = Args::parse();

	let subscriber = tracing_subscriber::fmt()
		.with_max_level(if args.verbose { tracing::Level::TRACE } else { tracing::Level::INFO })
		.with_writer(std::io::stderr)
		.finish();
	tracing::subscriber::set_global_default(subscriber)?;

	let mut config = match &args.config {
		Some(path) => DispatcherConfig::load(path).with_context(|| format!("loading {}", path.display()))?,
		None => DispatcherConfig::default(),
	};
	if let Some(ms) = args.idle_timeout_ms {
		config = config.with_idle_timeout(Duration::from_millis(ms));
	}

	let Some((last, burst)) = args.filters.split_last() else {
		bail!("at least one --filter is required");
	};

	let list = Arc::new(NumberList::new(args.data));
	let (port, mut fg) = foreground();
	let dispatcher = FilterDispatcher::with_config(Arc::clone(&list), port, config);
	info!(items = list.data().len(), requests = args.filters.len(), "Starting sift-demo");

	let (done_tx, mut done_rx) = mpsc::unbounded_channel();
	for filter in burst {
		dispatcher.filter(*filter);
	}
	dispatcher.filter_with_listener(*last, move |count| {
		let _ = done_tx.send(count);
	});

	let count = tokio::time::timeout(Duration::from_secs(30), async {
		loop {
			if let Ok(count) = done_rx.try_recv() {
				return Ok(count);
			}
			if !fg.turn().await {
				bail!("foreground closed before the last request completed");
			}
		}
	})
	.await
	.context("filtering timed out")??;

	let stats = dispatcher.stats();
	info!(executed = stats.executed, superseded = stats.superseded, "Filtering finished");

	let shown: Vec<String> = list.displayed().iter().map(i64::to_string).collect();
	println!("{last}: {count} [{}]", shown.join(", "));
	Ok(())
}
