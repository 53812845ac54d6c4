//! Error types for the framebuffer engine
//!
//! This module defines the error types used throughout the engine,
//! including device calls, context lifecycle and render target management.

use std::fmt;

/// Result type for framebuffer engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Framebuffer engine errors
#[derive(Debug, Clone)]
pub enum Error {
    /// Backend-specific error (OpenGL, lock poisoning, etc.)
    BackendError(String),

    /// Out of GPU memory
    OutOfMemory,

    /// Invalid resource (texture, framebuffer, renderbuffer, etc.)
    InvalidResource(String),

    /// Initialization failed (context, device, subsystems)
    InitializationFailed(String),

    /// The caller broke an operation's contract (empty target, no context, ...)
    ///
    /// The operation had no effect beyond reporting the violation.
    PreconditionFailed(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::OutOfMemory => write!(f, "Out of GPU memory"),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
            Error::PreconditionFailed(msg) => write!(f, "Precondition failed: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

// ===== ERROR MACROS =====

/// Log an ERROR message and build an `Error` of the given variant
///
/// The message is logged with file:line information before the error
/// value is returned, so every reported failure shows up in the log.
///
/// # Example
///
/// ```ignore
/// return Err(engine_err!("fbengine::TargetManager", PreconditionFailed,
///     "no context for target {}", id));
/// ```
#[macro_export]
macro_rules! engine_err {
    ($source:expr, $variant:ident, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::engine_error!($source, "{}", message);
        $crate::error::Error::$variant(message)
    }};
}

/// Log an ERROR message and return early with `Error::BackendError`
///
/// # Example
///
/// ```ignore
/// engine_bail!("fbengine::gl", "glCheckFramebufferStatus returned {:#x}", status);
/// ```
#[macro_export]
macro_rules! engine_bail {
    ($source:expr, $($arg:tt)*) => {
        return Err($crate::engine_err!($source, BackendError, $($arg)*))
    };
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
