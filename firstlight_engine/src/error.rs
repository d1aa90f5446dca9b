//! Error types for the FirstLight engine
//!
//! This module defines the error types used throughout the engine,
//! including window/context setup, shader compilation, program linking
//! and resource management.

use std::fmt;

use crate::shader::ShaderStage;

/// Result type for FirstLight engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// FirstLight engine errors
#[derive(Debug, Clone)]
pub enum Error {
    /// Backend-specific error (OpenGL driver, mock device, etc.)
    BackendError(String),

    /// Invalid resource (buffer, layout, program, etc.)
    InvalidResource(String),

    /// The window or its rendering context could not be created
    WindowCreationFailed(String),

    /// Device function pointers could not be loaded
    LoaderFailed(String),

    /// A shader stage failed to compile
    ShaderCompileFailed {
        /// Stage that failed
        stage: ShaderStage,
        /// Device compiler diagnostic (bounded)
        log: String,
    },

    /// A program failed to link
    ProgramLinkFailed(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::WindowCreationFailed(msg) => write!(f, "Failed to create window: {}", msg),
            Error::LoaderFailed(msg) => write!(f, "Failed to load device functions: {}", msg),
            Error::ShaderCompileFailed { stage, log } => {
                write!(f, "{} shader compilation failed: {}", stage.name(), log)
            }
            Error::ProgramLinkFailed(log) => write!(f, "Program linking failed: {}", log),
        }
    }
}

impl std::error::Error for Error {}

impl Error {
    /// Whether the error aborts startup before any device object exists
    ///
    /// Window and loader failures are fatal; everything else is reported to
    /// the caller, who decides.
    pub fn is_fatal_setup_error(&self) -> bool {
        matches!(self, Error::WindowCreationFailed(_) | Error::LoaderFailed(_))
    }
}

// ===== ERROR MACROS =====

/// Log an ERROR message and build an `Error::BackendError` from it
///
/// # Example
///
/// ```no_run
/// # use firstlight_engine::engine_err;
/// let err = engine_err!("firstlight::Geometry", "Buffer {} missing", 3);
/// ```
#[macro_export]
macro_rules! engine_err {
    ($source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::engine_error!($source, "{}", message);
        $crate::firstlight::Error::BackendError(message)
    }};
}

/// Log an ERROR message and return `Err(Error::BackendError)` from the
/// enclosing function
#[macro_export]
macro_rules! engine_bail {
    ($source:expr, $($arg:tt)*) => {
        return Err($crate::engine_err!($source, $($arg)*))
    };
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
