use thiserror::Error;

/// Failure raised while computing filter results.
///
/// The worker never hands this to callers: it is logged and replaced by
/// [`FilterResults::empty`](crate::FilterResults::empty).
#[derive(Debug, Error)]
pub enum FilterError {
	/// The provider rejected the constraint or its data.
	#[error("filtering failed: {0}")]
	Failed(String),

	/// The provider panicked; carries the panic message.
	#[error("filtering panicked: {0}")]
	Panicked(String),

	/// Error bubbled up from the provider's own dependencies.
	#[error(transparent)]
	Source(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl FilterError {
	/// Builds a [`FilterError::Failed`] from any message.
	pub fn failed(msg: impl Into<String>) -> Self {
		Self::Failed(msg.into())
	}
}
