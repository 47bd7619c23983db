use crate::device::DeviceError;

/// Result alias that carries the custom [`AnimatorError`] type.
pub type Result<T> = std::result::Result<T, AnimatorError>;

/// Common error type for the core crate.
#[derive(Debug, thiserror::Error)]
pub enum AnimatorError {
    /// Free-form message for conditions that have no dedicated variant.
    #[error("{0}")]
    Message(String),
    /// The device could not be brought into its all-off starting state.
    #[error("couldn't initialise the device: {0}")]
    DeviceInit(#[source] DeviceError),
    /// A frame could not be committed to the device.
    #[error("couldn't apply changes: {0}")]
    DeviceApply(#[source] DeviceError),
    /// The device handle was not returned by the last animation task.
    #[error("device handle was lost by a failed animation session")]
    DeviceLost,
    /// An animation task panicked or was aborted before acknowledging.
    #[error("animation session aborted: {0}")]
    SessionAborted(#[from] tokio::task::JoinError),
    /// The remote command queue could not be reached or read.
    #[error("command source failed: {0}")]
    CommandSource(#[from] reqwest::Error),
    /// Configuration file could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
    /// Wrapper around standard IO errors.
    #[error("{0}")]
    Io(#[from] std::io::Error),
}

impl AnimatorError {
    /// Creates a new error that simply wraps the provided message.
    pub fn msg<T: Into<String>>(msg: T) -> Self {
        Self::Message(msg.into())
    }
}

impl From<&str> for AnimatorError {
    fn from(value: &str) -> Self {
        Self::msg(value)
    }
}

impl From<String> for AnimatorError {
    fn from(value: String) -> Self {
        Self::Message(value)
    }
}
