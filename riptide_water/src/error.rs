//! Error types for the Riptide water pipeline
//!
//! Errors fall in three families: configuration errors (fatal to pipeline
//! setup), resource exhaustion (the water effect is disabled for the session)
//! and transient draw failures (the current frame's surface draw is skipped).

use std::fmt;

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, Error>;

/// Pipeline errors
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Invalid setup: unknown target name, degenerate clip plane,
    /// mismatched attachment sizes, zero-sized target, bad config value
    ConfigurationError(String),

    /// Off-screen allocation failed (typically out of GPU memory)
    ResourceExhaustion(String),

    /// A single draw call failed during a pass
    DrawFailed(String),

    /// A resource was used after destruction or does not belong to the device
    InvalidResource(String),

    /// Backend-specific error (OpenGL, WebGL, Vulkan, ...)
    BackendError(String),
}

impl Error {
    /// True for errors that must abort pipeline setup
    pub fn is_configuration(&self) -> bool {
        matches!(self, Error::ConfigurationError(_))
    }

    /// True for allocation failures that disable the effect instead of aborting
    pub fn is_resource_exhaustion(&self) -> bool {
        matches!(self, Error::ResourceExhaustion(_))
    }

    /// True for per-frame failures that the next frame retries
    pub fn is_transient(&self) -> bool {
        matches!(self, Error::DrawFailed(_))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ConfigurationError(msg) => write!(f, "Configuration error: {}", msg),
            Error::ResourceExhaustion(msg) => write!(f, "Resource exhaustion: {}", msg),
            Error::DrawFailed(msg) => write!(f, "Draw failed: {}", msg),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
