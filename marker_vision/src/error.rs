// THEORY:
// Detection is a pure transform, so the error surface is small. A frame whose
// byte count does not match its declared dimensions is refused up front, and
// the parallel detector can additionally lose a worker task.

use thiserror::Error;

/// Failures raised by the detectors before or while processing a frame.
#[derive(Debug, Error)]
pub enum DetectError {
    /// The buffer length does not describe a `width` x `height` RGBA frame,
    /// or one of the dimensions is zero. Nothing has been read or written.
    #[error("buffer of {len} bytes does not match a {width}x{height} RGBA frame")]
    InvalidDimensions { width: u32, height: u32, len: usize },

    /// A worker task of the parallel detector panicked or was cancelled.
    #[error("marker worker task failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, DetectError>;
