// ============================================================================
// XliffMerge - Error Model
// ============================================================================
//
// File: src/models/error.rs
// Responsibility: error taxonomy shared by catalogs, formats and the merge run
// Boundaries:
//   - ✅ Error kind definitions
//   - ✅ Classified / unclassified distinction
//   - ✅ Conversions from lower level errors
//   - ❌ Should not contain error reporting
//   - ❌ Should not contain recovery logic
//
// ============================================================================

use std::path::Path;
use thiserror::Error;

/// Errors raised while loading, merging or saving catalogs.
///
/// `Config`, `NotFound` and `Malformed` are classified: they carry a message
/// meant for the user and end the affected unit of work with a nonzero
/// status. `Unexpected` is everything else and aborts the run once all
/// in-flight work has finished.
#[derive(Debug, Clone, Error)]
pub enum MergeError {
    /// Invalid profile or parameter combination
    #[error("{0}")]
    Config(String),
    /// A required file does not exist
    #[error("{0}")]
    NotFound(String),
    /// A catalog file could not be parsed
    #[error("{0}")]
    Malformed(String),
    /// Anything the tool does not know how to classify
    #[error("{0}")]
    Unexpected(String),
}

/// Short alias used across the crate
pub type MergeResult<T> = std::result::Result<T, MergeError>;

impl MergeError {
    pub fn config<S: Into<String>>(msg: S) -> Self {
        MergeError::Config(msg.into())
    }

    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        MergeError::NotFound(msg.into())
    }

    pub fn malformed<S: Into<String>>(msg: S) -> Self {
        MergeError::Malformed(msg.into())
    }

    pub fn unexpected<S: Into<String>>(msg: S) -> Self {
        MergeError::Unexpected(msg.into())
    }

    /// Whether the error is an expected, user-facing failure
    pub fn is_classified(&self) -> bool {
        !matches!(self, MergeError::Unexpected(_))
    }

    /// Prefix the message with the file the error happened in.
    pub fn in_file(self, path: &Path) -> Self {
        let prefix = format!("file \"{}\", ", path.display());
        match self {
            MergeError::Config(msg) => MergeError::Config(prefix + &msg),
            MergeError::NotFound(msg) => MergeError::NotFound(prefix + &msg),
            MergeError::Malformed(msg) => MergeError::Malformed(prefix + &msg),
            MergeError::Unexpected(msg) => MergeError::Unexpected(prefix + &msg),
        }
    }
}

impl From<std::io::Error> for MergeError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => MergeError::NotFound(err.to_string()),
            _ => MergeError::Unexpected(err.to_string()),
        }
    }
}

impl From<roxmltree::Error> for MergeError {
    fn from(err: roxmltree::Error) -> Self {
        MergeError::Malformed(err.to_string())
    }
}
