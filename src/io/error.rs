//! Error types for map-file persistence

use std::fmt;
use std::path::PathBuf;

/// Error raised while loading or saving a map document
#[derive(Debug)]
pub enum MapError {
    /// Filesystem operation failed
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// JSON encoding or decoding failed
    Serialization {
        /// Path of the document being processed
        path: PathBuf,
        /// Underlying serde error
        source: serde_json::Error,
    },
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::Serialization { path, source } => {
                write!(f, "Malformed map document '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for MapError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::FileSystem { source, .. } => Some(source),
            Self::Serialization { source, .. } => Some(source),
        }
    }
}

/// Convenience alias for map persistence results
pub type Result<T> = std::result::Result<T, MapError>;
