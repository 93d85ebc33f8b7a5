use std::path::PathBuf;

use thiserror::Error;

/// Failures of fetching, storing and loading samples.
///
/// These are fatal to the operation that hit them. Failures of the user's
/// solution are not represented here; see [`crate::invoker::InvocationError`].
#[derive(Debug, Error)]
pub enum KattisError {
    /// Unknown problem on the judge, or samples never downloaded.
    #[error("not found: {0}")]
    NotFound(String),

    #[error("network error: {0}")]
    Network(String),

    /// The judge's sample archive does not have the expected layout.
    #[error("malformed sample archive: {0}")]
    Format(String),

    #[error("corrupt sample file {}: {reason}", .path.display())]
    CorruptData { path: PathBuf, reason: String },

    #[error("invalid problem id {0:?}")]
    InvalidProblemId(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, KattisError>;
