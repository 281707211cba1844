//! # Secret Resolver
//!
//! Resolves a secret name plus a version selector into one GetSecretValue call.

use super::selector::{compose_identifier, VersionSelector};
use super::sensitive::{SensitiveBytes, SensitiveString};
use crate::context::CallContext;
use crate::error::{Error, Result};
use crate::observability::metrics;
use crate::provider::{SecretValueOutput, SecretValueTransport};
use chrono::{DateTime, SecondsFormat, Utc};
use tracing::{debug, info_span, warn, Instrument};

/// A fetched secret version
///
/// Returned by value; the resolver keeps no copy. The payload fields are sensitive and
/// must not be logged or persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchedSecret {
    /// Composite identifier of the fetched version
    pub id: String,
    pub arn: String,
    pub created_date: Option<DateTime<Utc>>,
    pub secret_binary: SensitiveBytes,
    pub secret_string: SensitiveString,
}

impl FetchedSecret {
    fn from_output(id: String, output: SecretValueOutput) -> Self {
        let SecretValueOutput {
            arn,
            created_date,
            secret_binary,
            secret_string,
        } = output;
        Self {
            id,
            arn: arn.unwrap_or_default(),
            created_date,
            secret_binary: secret_binary.map(SensitiveBytes::from).unwrap_or_default(),
            secret_string: secret_string.map(SensitiveString::from).unwrap_or_default(),
        }
    }

    /// Creation time as RFC3339 (seconds precision, `Z` suffix), empty when unknown
    #[must_use]
    pub fn created_date_rfc3339(&self) -> String {
        self.created_date
            .map(|d| d.to_rfc3339_opts(SecondsFormat::Secs, true))
            .unwrap_or_default()
    }
}

/// Versioned secret resolver
#[derive(Debug, Clone)]
pub struct SecretResolver<T> {
    transport: T,
}

impl<T: SecretValueTransport> SecretResolver<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Fetch the version of `secret_name` chosen by `selector`
    ///
    /// # Errors
    ///
    /// Returns [`Error::ReadSecret`] with the composite identifier and the transport
    /// cause when the call fails, or [`Error::InvalidRequest`] for an empty name.
    pub async fn fetch(
        &self,
        ctx: &CallContext,
        secret_name: &str,
        selector: &VersionSelector,
    ) -> Result<FetchedSecret> {
        if secret_name.is_empty() {
            return Err(Error::InvalidRequest("secret_id must not be empty".to_string()));
        }

        let id = compose_identifier(secret_name, selector);
        let span = info_span!("secret.fetch", secret.id = %id);

        async move {
            let request = selector.request_for(secret_name);
            match self.transport.get_secret_value(ctx, &request).await {
                Ok(output) => {
                    metrics::record_secret_fetch("found");
                    let secret = FetchedSecret::from_output(id, output);
                    debug!(arn = %secret.arn, "Fetched secret version");
                    Ok(secret)
                }
                Err(source) => {
                    metrics::record_secret_fetch("failed");
                    warn!(error = %source, "Failed reading secret version");
                    Err(Error::ReadSecret { id, source })
                }
            }
        }
        .instrument(span)
        .await
    }
}
