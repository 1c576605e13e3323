//! Error types for history queries
//!
//! Every failure surfaces to the immediate caller; nothing is retried or
//! swallowed inside the engine.

use crate::artifacts::objects::object_id::ObjectId;
use thiserror::Error;

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, HistoryError>;

/// Errors that can occur while resolving or walking commit history
#[derive(Debug, Error)]
pub enum HistoryError {
    /// The object store has no object with this id
    #[error("object {oid} not found")]
    ObjectNotFound {
        /// The id that could not be loaded
        oid: ObjectId,
    },

    /// Raw object bytes did not match the expected record grammar
    #[error("failed to parse {field}: {reason}")]
    Parse {
        /// The offending header or field name
        field: String,
        /// What was wrong with it
        reason: String,
    },

    /// A parent index or revision expression does not resolve
    #[error("revision does not exist [rev: {rev}, path: {path}]")]
    RevisionNotExist {
        /// The revision that failed to resolve (may be empty)
        rev: String,
        /// The path the revision was scoped to (may be empty)
        path: String,
    },

    /// The search pattern is not a valid regular expression
    #[error("invalid search pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// A caller-supplied argument is out of its domain
    #[error("invalid argument {name}: {reason}")]
    InvalidArgument {
        /// Name of the argument
        name: &'static str,
        /// Why it was rejected
        reason: String,
    },

    /// I/O failure while reading from an on-disk store
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl HistoryError {
    pub fn parse(field: impl Into<String>, reason: impl Into<String>) -> Self {
        HistoryError::Parse {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn revision_not_exist(rev: impl Into<String>, path: impl Into<String>) -> Self {
        HistoryError::RevisionNotExist {
            rev: rev.into(),
            path: path.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, HistoryError::ObjectNotFound { .. })
    }
}
