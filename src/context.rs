//! # Call Context
//!
//! The caller's invocation context, passed unmodified to every remote call.
//!
//! A context may carry a deadline. A call made under an expired context fails
//! immediately with [`TransportError::deadline_exceeded`] and the transport is
//! never polled. Cancellation is dropping the future.

use crate::error::TransportError;
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;

/// Per-invocation context
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallContext {
    deadline: Option<Instant>,
}

impl CallContext {
    /// Context with no deadline
    #[must_use]
    pub fn background() -> Self {
        Self::default()
    }

    /// Context that expires at `deadline`
    #[must_use]
    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            deadline: Some(deadline),
        }
    }

    /// Context that expires `timeout` from now
    #[must_use]
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::with_deadline(Instant::now() + timeout)
    }

    /// Context with an optional timeout, as read from configuration
    #[must_use]
    pub fn from_timeout(timeout: Option<Duration>) -> Self {
        timeout.map_or_else(Self::background, Self::with_timeout)
    }

    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    /// Run a remote call under this context
    ///
    /// # Errors
    ///
    /// Returns the call's own error, or a deadline-exceeded [`TransportError`] when the
    /// context expired before the call started or before it completed.
    pub async fn run<T, F>(&self, call: F) -> Result<T, TransportError>
    where
        F: Future<Output = Result<T, TransportError>>,
    {
        match self.deadline {
            None => call.await,
            Some(deadline) => {
                if Instant::now() >= deadline {
                    return Err(TransportError::deadline_exceeded());
                }
                tokio::time::timeout_at(deadline, call)
                    .await
                    .unwrap_or_else(|_elapsed| Err(TransportError::deadline_exceeded()))
            }
        }
    }
}
