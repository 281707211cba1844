//! # Prelude
//!
//! Re-exports commonly used types and traits for convenience.
//!
//! ## Usage
//!
//! ```rust
//! use aws_resource_reconciler::prelude::*;
//! ```

// Transport traits - needed for implementing or mocking providers
pub use crate::provider::{
    GetSecretValueRequest, SecretValueOutput, SecretValueTransport, TaggingTransport,
};

// Tag reconciliation
pub use crate::tags::{SystemTagFilter, TagDiff, TagReconciler, TagSet};

// Secret resolution
pub use crate::secret::{
    compose_identifier, select_version, EphemeralSecret, FetchedSecret, OpenRequest,
    OpenResponse, SecretResolver, SensitiveBytes, SensitiveString, VersionSelector,
};

// Config and invocation context
pub use crate::config::ReconcilerConfig;
pub use crate::context::CallContext;

// Common error types
pub use crate::error::{Error, TransportError};

// AWS implementations
pub use crate::provider::aws::{
    AwsParameterStoreTagging, AwsSecretsManagerTagging, AwsSecretsManagerValues,
};
