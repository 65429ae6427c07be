//! Error types for the photo-dash host

use std::path::PathBuf;

use photo_dash_core::RenderError;
use thiserror::Error;

/// Result type for host operations
pub type DashResult<T> = Result<T, DashError>;

/// Errors raised while loading configuration, reading requests or storing images
#[derive(Debug, Error)]
pub enum DashError {
    /// Rendering or canvas configuration failed
    #[error(transparent)]
    Render(#[from] RenderError),

    /// A file could not be read or written
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A configuration file or request document is not valid JSON
    #[error("Malformed JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Module name that cannot be used as an image file name
    #[error("Invalid module name {0:?}")]
    InvalidModule(String),
}

impl DashError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DashError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        DashError::Json {
            path: path.into(),
            source,
        }
    }
}
