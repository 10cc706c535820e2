//! Error types for quizdesk.
//!
//! A timed-out session is not an error: it is reported through
//! [`SessionOutcome::TimedOut`](crate::session::SessionOutcome::TimedOut).

use std::path::PathBuf;

use thiserror::Error;

/// Failure to read a backing JSON resource (question pool or history).
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be read (missing, permissions, ...).
    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid JSON or does not match the expected record shape.
    #[error("malformed JSON in {}", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The file is valid JSON but its top level is not an array.
    #[error("expected a JSON array at the top level of {}", path.display())]
    NotASequence { path: PathBuf },
}

/// Errors surfaced by the quiz core.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error(transparent)]
    Load(#[from] LoadError),

    /// Rejected user input: empty name, unsupported question count,
    /// out-of-range answer index, unknown option.
    #[error("invalid input: {0}")]
    Validation(String),

    /// The pool holds fewer valid questions than were requested.
    #[error("not enough questions: requested {requested}, pool has {available}")]
    InsufficientPool { requested: usize, available: usize },

    /// Writing a backing file failed.
    #[error("failed to write {}", path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize history")]
    Serialize(#[from] serde_json::Error),
}

impl QuizError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        QuizError::Validation(message.into())
    }
}

/// Convenience alias used throughout the core crate.
pub type Result<T, E = QuizError> = std::result::Result<T, E>;
