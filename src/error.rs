//! Error handling for Stampwork
//!
//! One crate-wide error type. Load-time failures (atlas text, image files,
//! configuration) surface as `EngineError` and abort the load that raised
//! them. Drawing never fails: batch capacity is absorbed by flushing, and
//! errors raised by user draw code are logged at the frame boundary.

use std::error::Error as StdError;
use std::fmt;

use crate::atlas::AtlasError;

/// Main error type for Stampwork
#[derive(Debug)]
pub enum EngineError {
    // Load Errors
    Atlas(AtlasError),
    IoError {
        path: String,
        error: String,
    },
    ImageDecode {
        path: String,
        error: String,
    },
    ResourceNotFound {
        resource_type: String,
        id: String,
    },

    // Device Errors
    DeviceError {
        operation: String,
        error: String,
    },

    // Configuration Errors
    InvalidConfig {
        field: String,
        value: String,
        reason: String,
    },
    DeserializationError {
        context: String,
        error: String,
    },

    // Caller Errors
    InvalidArgument {
        name: String,
        reason: String,
    },

    // Lifecycle Errors
    InitializationError(String),

    // Generic fallback for unexpected errors
    Internal {
        message: String,
    },
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::Atlas(error) => write!(f, "Atlas error: {}", error),
            EngineError::IoError { path, error } => write!(f, "IO error for {}: {}", path, error),
            EngineError::ImageDecode { path, error } => {
                write!(f, "Could not decode image {}: {}", path, error)
            }
            EngineError::ResourceNotFound { resource_type, id } => {
                write!(f, "Resource not found: {} '{}'", resource_type, id)
            }

            EngineError::DeviceError { operation, error } => {
                write!(f, "Device operation '{}' failed: {}", operation, error)
            }

            EngineError::InvalidConfig {
                field,
                value,
                reason,
            } => write!(f, "Invalid config: {} = {} ({})", field, value, reason),
            EngineError::DeserializationError { context, error } => {
                write!(f, "Deserialization error in {}: {}", context, error)
            }

            EngineError::InvalidArgument { name, reason } => {
                write!(f, "Invalid argument '{}': {}", name, reason)
            }

            EngineError::InitializationError(msg) => write!(f, "Initialization error: {}", msg),

            EngineError::Internal { message } => write!(f, "Internal error: {}", message),
        }
    }
}

impl StdError for EngineError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            EngineError::Atlas(error) => Some(error),
            _ => None,
        }
    }
}

/// Type alias for Results in Stampwork
pub type EngineResult<T> = Result<T, EngineError>;

// Conversion traits for subsystem errors

impl From<AtlasError> for EngineError {
    fn from(error: AtlasError) -> Self {
        EngineError::Atlas(error)
    }
}

/// Build an `IoError` that names the file involved
pub fn io_error(path: &std::path::Path, error: std::io::Error) -> EngineError {
    EngineError::IoError {
        path: path.display().to_string(),
        error: error.to_string(),
    }
}

/// Build an `ImageDecode` error that names the file involved
pub fn image_error(path: &std::path::Path, error: image::ImageError) -> EngineError {
    EngineError::ImageDecode {
        path: path.display().to_string(),
        error: error.to_string(),
    }
}

// Helper functions for common error patterns

/// Convert Option to Result with context
pub trait OptionExt<T> {
    fn ok_or_engine<F>(self, f: F) -> EngineResult<T>
    where
        F: FnOnce() -> EngineError;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_engine<F>(self, f: F) -> EngineResult<T>
    where
        F: FnOnce() -> EngineError,
    {
        self.ok_or_else(f)
    }
}
