//! Coalescing background filtering.
//!
//! A [`FilterDispatcher`] runs a [`Filter`] computation on a lazily spawned
//! worker thread, keeps only the newest not-yet-started request, hands the
//! results to a host-supplied [`Foreground`] executor, and lets the worker
//! thread exit once it has been idle for [`DispatcherConfig::idle_timeout`].

/// Dispatcher configuration and TOML loading.
pub mod config;
/// Public dispatcher handle.
pub mod dispatcher;
/// Computation failure type.
pub mod error;
/// Foreground executor trait and channel-backed loop.
pub mod foreground;
/// Computation provider trait.
pub mod provider;
/// Request, listener and result types.
pub mod request;
/// Dispatcher counters.
pub mod stats;
/// Worker thread lifecycle.
pub mod worker;

mod deliver;
mod panic;
mod slot;
mod token;

pub use config::{ConfigError, DEFAULT_IDLE_TIMEOUT, DispatcherConfig};
pub use dispatcher::FilterDispatcher;
pub use error::FilterError;
pub use foreground::{Foreground, ForegroundClosed, ForegroundLoop, ForegroundPort, ForegroundTask, foreground};
pub use provider::Filter;
pub use request::{FilterListener, FilterResults, NO_RESULTS};
pub use stats::DispatcherStats;
pub use worker::WorkerPhase;
