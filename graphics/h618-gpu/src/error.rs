//! Error types for GPU controller operations

use core::fmt;

/// GPU controller result type
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// GPU controller error type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A null or otherwise unusable handle was supplied
    InvalidArgument,
    /// The reset handshake ran out of polls before the busy bit cleared
    ResetTimeout,
    /// The operation needs a device in the `Ready` state
    NotReady,
}

impl Error {
    /// Whether re-running Reset/Initialize may clear the condition
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Error::ResetTimeout)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidArgument => write!(f, "Invalid argument"),
            Error::ResetTimeout => write!(f, "GPU reset timed out"),
            Error::NotReady => write!(f, "GPU not ready"),
        }
    }
}
