//! Error types for the Nova framework
//!
//! This module defines the error types used throughout the runtime,
//! covering parameter marshalling, constant-buffer updates and backend
//! interaction.

use std::fmt;

/// Result type for Nova framework operations
pub type Result<T> = std::result::Result<T, Error>;

/// Nova framework errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A non-float parameter was pushed into a float-only constant buffer
    UnsupportedParameterType,

    /// Operation requires object-table indirection (strings, textures, ...)
    /// which flat byte parameters do not model
    NotSupported(String),

    /// Invalid resource state or out-of-bounds access
    InvalidResource(String),

    /// Backend-specific error
    BackendError(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnsupportedParameterType => {
                write!(f, "Unsupported parameter type: constant buffers only accept float data")
            }
            Error::NotSupported(msg) => write!(f, "Not supported: {}", msg),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

// ===== ERROR MACROS =====

/// Build an `Error::InvalidResource`, logging it first
///
/// # Example
///
/// ```no_run
/// # let index = 3; let count = 2;
/// # let _: nova_framework::nova::Error =
/// nova_framework::nova_err!("nova::ConstantBuffer", "Index {} out of bounds (count: {})", index, count);
/// ```
#[macro_export]
macro_rules! nova_err {
    ($source:expr, $($arg:tt)*) => {{
        $crate::nova_error!($source, $($arg)*);
        $crate::nova::Error::InvalidResource(format!($($arg)*))
    }};
}

/// Log and return early with an `Error::InvalidResource`
///
/// # Example
///
/// ```ignore
/// if offset > size {
///     nova_bail!("nova::ConstantBuffer", "Offset {} exceeds size {}", offset, size);
/// }
/// ```
#[macro_export]
macro_rules! nova_bail {
    ($source:expr, $($arg:tt)*) => {
        return Err($crate::nova_err!($source, $($arg)*))
    };
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
