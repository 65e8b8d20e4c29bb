use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Idle window after which an unused worker thread exits.
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_millis(3000);

const DEFAULT_THREAD_NAME: &str = "sift-filter";

/// Errors that can occur when loading a dispatcher configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error reading a configuration file.
	#[error("I/O error reading {path}: {error}")]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// Error parsing TOML syntax or shape.
	#[error("TOML parse error: {0}")]
	Toml(#[from] toml::de::Error),

	/// Thread names must be non-empty and free of NUL bytes.
	#[error("invalid worker thread name: {0:?}")]
	InvalidThreadName(String),
}

/// Per-dispatcher configuration.
///
/// In TOML the idle window is written as integer milliseconds:
///
/// ```toml
/// idle_timeout_ms = 3000
/// thread_name = "sift-filter"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DispatcherConfig {
	#[serde(rename = "idle_timeout_ms", with = "millis")]
	pub(crate) idle_timeout: Duration,
	pub(crate) thread_name: String,
}

impl Default for DispatcherConfig {
	fn default() -> Self {
		Self {
			idle_timeout: DEFAULT_IDLE_TIMEOUT,
			thread_name: DEFAULT_THREAD_NAME.to_owned(),
		}
	}
}

impl DispatcherConfig {
	/// Sets how long a worker waits after its last computation before exiting.
	#[must_use]
	pub fn with_idle_timeout(mut self, timeout: Duration) -> Self {
		self.idle_timeout = timeout;
		self
	}

	/// Sets the worker thread name prefix. Each worker appends its generation.
	///
	/// # Panics
	///
	/// Panics if `name` is empty or contains a NUL byte.
	#[must_use]
	pub fn with_thread_name(mut self, name: impl Into<String>) -> Self {
		let name = name.into();
		assert!(valid_thread_name(&name), "worker thread name must be non-empty and NUL-free");
		self.thread_name = name;
		self
	}

	pub fn idle_timeout(&self) -> Duration {
		self.idle_timeout
	}

	pub fn thread_name(&self) -> &str {
		&self.thread_name
	}

	/// Parses a configuration from TOML text. Missing keys keep their defaults.
	pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
		let config: Self = toml::from_str(text)?;
		if !valid_thread_name(&config.thread_name) {
			return Err(ConfigError::InvalidThreadName(config.thread_name));
		}
		Ok(config)
	}

	/// Reads and parses a TOML configuration file.
	pub fn load(path: &Path) -> Result<Self, ConfigError> {
		let text = std::fs::read_to_string(path).map_err(|error| ConfigError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		let config = Self::from_toml(&text)?;
		tracing::debug!(path = %path.display(), idle_ms = config.idle_timeout.as_millis(), "filter.config.loaded");
		Ok(config)
	}
}

fn valid_thread_name(name: &str) -> bool {
	!name.is_empty() && !name.contains('\0')
}

mod millis {
	use std::time::Duration;

	use serde::{Deserialize, Deserializer, Serializer};

	pub(super) fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.serialize_u64(u64::try_from(value.as_millis()).unwrap_or(u64::MAX))
	}

	pub(super) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
		u64::deserialize(deserializer).map(Duration::from_millis)
	}
}
