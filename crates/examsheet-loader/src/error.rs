//! Loader error types.

use std::path::PathBuf;

use examsheet_core::error::ExamError;
use thiserror::Error;

/// Errors that can occur while obtaining an exam definition.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The server answered with a non-success status.
    #[error("failed to load exam data: HTTP {status} {message}")]
    Http { status: u16, message: String },

    /// The request timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// A network error occurred.
    #[error("network error: {0}")]
    Network(String),

    /// A local file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The exam data is not valid JSON/TOML.
    #[error("failed to parse exam data: {0}")]
    Parse(String),

    /// The page carries no `examData` object.
    #[error("no embedded exam data found in {0}")]
    NotEmbedded(String),

    /// Required fields are missing or inconsistent.
    #[error("invalid exam data: {}", .0.join("; "))]
    Invalid(Vec<String>),

    #[error(transparent)]
    Exam(#[from] ExamError),

    #[error("invalid extraction pattern: {0}")]
    Pattern(#[from] regex::Error),
}
