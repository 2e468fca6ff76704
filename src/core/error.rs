//! Error handling for the SDK generator.
//!
//! This module defines the main error type `Error` used throughout the library,
//! along with a convenient `Result` type alias. It uses `thiserror` for easy
//! error handling and implements conversions from common error types.
//!
//! # Examples
//!
//! ```
//! use openworld_sdk_generator::error::{Error, Result};
//!
//! fn might_fail(namespace: &str) -> Result<()> {
//!     if namespace.is_empty() {
//!         return Err(Error::invalid_argument("namespace must not be empty"));
//!     }
//!     Ok(())
//! }
//!
//! assert!(might_fail("").is_err());
//! ```

use thiserror::Error;

/// Result type for SDK generation operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for SDK generation operations
#[derive(Debug, Error)]
pub enum Error {
    /// A required CLI input was present but unusable
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The input spec is not valid base64
    #[error("Failed to decode input spec: {0}")]
    Decode(#[from] base64::DecodeError),

    /// The decoded input spec is not a readable zip archive
    #[error("Invalid spec archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// The archive holds no file entries
    #[error("Spec archive contains no entries")]
    EmptyArchive,

    /// The archive holds more than the single spec file
    #[error("Spec archive must contain exactly one entry, found {count}")]
    MultipleEntries { count: usize },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// The generation engine could not be started
    #[error("Failed to launch generation engine '{program}': {source}")]
    EngineUnavailable {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The generation engine ran and reported failure
    #[error("Generation engine exited with status {exit_code}: {stderr}")]
    Engine { exit_code: i32, stderr: String },

    /// Post-processing of the generated package failed
    #[error("Post-processing error: {0}")]
    PostProcess(String),
}

impl Error {
    /// Create a new invalid argument error
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Create a new post-processing error
    pub fn post_process<S: Into<String>>(msg: S) -> Self {
        Self::PostProcess(msg.into())
    }

    /// Short, stable label for the failure class, used in log fields
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidArgument(_) => "invalid_argument",
            Self::Decode(_) => "decode",
            Self::Archive(_) => "archive",
            Self::EmptyArchive => "empty_archive",
            Self::MultipleEntries { .. } => "multiple_entries",
            Self::Io(_) => "io",
            Self::Json(_) => "json",
            Self::EngineUnavailable { .. } => "engine_unavailable",
            Self::Engine { .. } => "engine",
            Self::PostProcess(_) => "post_process",
        }
    }
}
