//! Error taxonomy for a generation run.

use std::path::PathBuf;

use thiserror::Error;

/// Every failure that can end a generation run.
#[derive(Debug, Error)]
pub enum GenError {
    /// Network, auth, or file-not-found failure while fetching the document.
    #[error("Failed to load {locator}: {message}")]
    Transport {
        /// Locator as given on the command line.
        locator: String,
        /// Underlying failure.
        message: String,
    },

    /// The document is not syntactically valid JSON, or does not fit the
    /// API declaration shape.
    #[error("Could not load JSON as Swagger document: {0}")]
    InvalidJson(String),

    /// Valid JSON without an `apis` section.
    #[error("Could not load JSON as Swagger document")]
    NotSwagger,

    /// No converter is registered under the requested key.
    #[error("Unknown converter '{key}' (registered: {})", .known.join(", "))]
    UnknownConverter {
        /// Requested key.
        key: String,
        /// Registered keys, sorted.
        known: Vec<String>,
    },

    /// The template file for a kind does not exist.
    #[error("Template not found at {}", .path.display())]
    TemplateMissing {
        /// Path that was looked up.
        path: PathBuf,
    },

    /// The template engine rejected a template or the view.
    #[error("Failed to render {template} template: {message}")]
    Render {
        /// Template path.
        template: String,
        /// Engine error with its cause chain.
        message: String,
    },

    /// Reading or writing a file failed.
    #[error("I/O error on {}: {message}", .path.display())]
    Io {
        /// File or directory involved.
        path: PathBuf,
        /// Underlying failure.
        message: String,
    },
}

impl GenError {
    pub(crate) fn io(path: impl Into<PathBuf>, err: &std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: err.to_string(),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GenError>;
