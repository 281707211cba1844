//! # Errors
//!
//! Error types returned by the tag reconciler and the secret resolver.
//!
//! Every remote failure surfaces as a [`TransportError`]. The reconciler and
//! resolver wrap it with the operation and identifier so messages can be
//! correlated with logs; the cause text is carried verbatim. Nothing here is
//! retried.

use crate::constants::DEADLINE_EXCEEDED_CODE;
use thiserror::Error;

/// A failed remote call, as reported by the transport
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", render(.code.as_deref(), .message))]
pub struct TransportError {
    /// Service error code (e.g. `ResourceNotFoundException`) when the transport exposes one
    pub code: Option<String>,
    /// Cause text, verbatim
    pub message: String,
}

fn render(code: Option<&str>, message: &str) -> String {
    match code {
        Some(code) if !message.is_empty() => format!("{code}: {message}"),
        Some(code) => code.to_string(),
        None => message.to_string(),
    }
}

impl TransportError {
    /// Transport error without a service error code
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
        }
    }

    /// Transport error carrying a service error code
    pub fn with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            message: message.into(),
        }
    }

    /// The caller's deadline passed before or during the call
    #[must_use]
    pub fn deadline_exceeded() -> Self {
        Self::with_code(DEADLINE_EXCEEDED_CODE, "call deadline exceeded")
    }

    /// True when this error came from an expired call context
    #[must_use]
    pub fn is_deadline_exceeded(&self) -> bool {
        self.code.as_deref() == Some(DEADLINE_EXCEEDED_CODE)
    }
}

/// Errors returned by the exposed operations
#[derive(Debug, Error)]
pub enum Error {
    /// Listing tags failed; the transport error is passed through unchanged
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The untag call failed; the tag call was not attempted
    #[error("untagging resource ({identifier}): {source}")]
    Untag {
        identifier: String,
        #[source]
        source: TransportError,
    },

    /// The tag call failed after any removals were applied
    #[error("tagging resource ({identifier}): {source}")]
    Tag {
        identifier: String,
        #[source]
        source: TransportError,
    },

    /// GetSecretValue failed for the composite identifier
    #[error("failed reading secret ({id}): {source}")]
    ReadSecret {
        id: String,
        #[source]
        source: TransportError,
    },

    /// The request was rejected before any remote call
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl Error {
    /// The underlying transport failure, if this error came from a remote call
    #[must_use]
    pub fn transport(&self) -> Option<&TransportError> {
        match self {
            Error::Transport(source)
            | Error::Untag { source, .. }
            | Error::Tag { source, .. }
            | Error::ReadSecret { source, .. } => Some(source),
            Error::InvalidRequest(_) => None,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
