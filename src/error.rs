//! Global error handling for gatherfs
//!
//! Only failures that end the run live here. A file that cannot be read
//! during a scan is recorded as a [`crate::types::SkippedFile`] instead.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Global error type for gatherfs operations
#[derive(Error, Debug)]
pub enum GatherError {
    /// File system errors
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// The output directory could not be created
    #[error("Failed to create output directory {}: {source}", .path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The output file could not be created or written
    #[error("Failed to write output file {}: {source}", .path.display())]
    OutputFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// JSON processing errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Specialized Result type for gatherfs operations
pub type Result<T> = std::result::Result<T, GatherError>;

/// Creates a GatherError with a formatted message
#[macro_export]
macro_rules! error {
    ($error_type:ident, $($arg:tt)*) => {
        $crate::error::GatherError::$error_type(format!($($arg)*))
    };
}

/// Returns an error result with a formatted message
#[macro_export]
macro_rules! bail {
    ($error_type:ident, $($arg:tt)*) => {
        return Err($crate::error!($error_type, $($arg)*))
    };
}

/// Ensures a condition is true, otherwise returns an error
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $error_type:ident, $($arg:tt)*) => {
        if !($cond) {
            $crate::bail!($error_type, $($arg)*)
        }
    };
}

// main returns io::Result, so fatal errors surface through this conversion
impl From<GatherError> for io::Error {
    fn from(err: GatherError) -> Self {
        match err {
            GatherError::Io(e) => e,
            other => io::Error::new(io::ErrorKind::Other, other.to_string()),
        }
    }
}
