//! # Provider Modules
//!
//! Narrow transport interfaces consumed by the reconciler and resolver, and
//! their AWS SDK implementations.
//!
//! Each provider implements either:
//! - `TaggingTransport` for resources that carry tags
//! - `SecretValueTransport` for versioned secret lookups
//!
//! Implementations perform exactly one remote call per method. They do not retry.

use crate::context::CallContext;
use crate::error::TransportError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Tagging API of a remote service
#[async_trait]
pub trait TaggingTransport: Send + Sync {
    /// List the tags currently attached to `identifier`
    async fn list_tags_for_resource(
        &self,
        ctx: &CallContext,
        identifier: &str,
    ) -> Result<HashMap<String, String>, TransportError>;

    /// Remove the given tag keys from `identifier`
    async fn untag_resource(
        &self,
        ctx: &CallContext,
        identifier: &str,
        keys: &[String],
    ) -> Result<(), TransportError>;

    /// Add or overwrite the given tags on `identifier`
    async fn tag_resource(
        &self,
        ctx: &CallContext,
        identifier: &str,
        tags: &HashMap<String, String>,
    ) -> Result<(), TransportError>;
}

/// A single GetSecretValue request
///
/// Built from a [`crate::secret::VersionSelector`], so at most one of the version
/// fields is populated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetSecretValueRequest {
    pub secret_id: String,
    pub version_id: Option<String>,
    pub version_stage: Option<String>,
}

/// Raw GetSecretValue response; every field may be absent
#[derive(Default)]
pub struct SecretValueOutput {
    pub arn: Option<String>,
    pub created_date: Option<DateTime<Utc>>,
    pub secret_binary: Option<Vec<u8>>,
    pub secret_string: Option<String>,
}

impl std::fmt::Debug for SecretValueOutput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretValueOutput")
            .field("arn", &self.arn)
            .field("created_date", &self.created_date)
            .field("secret_binary", &self.secret_binary.as_ref().map(|_| "<redacted>"))
            .field("secret_string", &self.secret_string.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Secret retrieval API of a remote service
#[async_trait]
pub trait SecretValueTransport: Send + Sync {
    async fn get_secret_value(
        &self,
        ctx: &CallContext,
        request: &GetSecretValueRequest,
    ) -> Result<SecretValueOutput, TransportError>;
}

#[async_trait]
impl<T: TaggingTransport + ?Sized> TaggingTransport for std::sync::Arc<T> {
    async fn list_tags_for_resource(
        &self,
        ctx: &CallContext,
        identifier: &str,
    ) -> Result<HashMap<String, String>, TransportError> {
        (**self).list_tags_for_resource(ctx, identifier).await
    }

    async fn untag_resource(
        &self,
        ctx: &CallContext,
        identifier: &str,
        keys: &[String],
    ) -> Result<(), TransportError> {
        (**self).untag_resource(ctx, identifier, keys).await
    }

    async fn tag_resource(
        &self,
        ctx: &CallContext,
        identifier: &str,
        tags: &HashMap<String, String>,
    ) -> Result<(), TransportError> {
        (**self).tag_resource(ctx, identifier, tags).await
    }
}

#[async_trait]
impl<T: SecretValueTransport + ?Sized> SecretValueTransport for std::sync::Arc<T> {
    async fn get_secret_value(
        &self,
        ctx: &CallContext,
        request: &GetSecretValueRequest,
    ) -> Result<SecretValueOutput, TransportError> {
        (**self).get_secret_value(ctx, request).await
    }
}

// Provider implementations
pub mod aws;
