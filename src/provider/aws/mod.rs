//! # AWS Providers
//!
//! AWS SDK implementations of the transport interfaces.
//!
//! This module provides:
//! - SDK config loading from the default credential chain, with optional region and
//!   endpoint overrides (for LocalStack or other mocks)
//! - Mapping of SDK errors into [`TransportError`] with the service code and message
//! - Per-call metrics shared by every AWS adapter

use crate::config::ReconcilerConfig;
use crate::context::CallContext;
use crate::error::TransportError;
use crate::observability::metrics;
use aws_config::SdkConfig;
use aws_sdk_secretsmanager::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use std::future::Future;
use std::time::Instant;
use tracing::{debug, info};

pub mod parameter_store;
pub mod secrets_manager;

pub use parameter_store::AwsParameterStoreTagging;
pub use secrets_manager::{AwsSecretsManagerTagging, AwsSecretsManagerValues};

/// Load the shared AWS SDK config
///
/// Credentials come from the default provider chain (env, profile, IRSA, IMDS).
pub async fn load_sdk_config(config: &ReconcilerConfig) -> SdkConfig {
    let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());

    if let Some(region) = &config.region {
        info!(region = %region, "Using configured AWS region");
        loader = loader.region(aws_config::Region::new(region.clone()));
    }

    if let Some(endpoint) = &config.endpoint_url {
        info!(endpoint = %endpoint, "Overriding AWS endpoint URL");
        loader = loader.endpoint_url(endpoint.clone());
    }

    loader.load().await
}

/// Map an SDK error into a transport error, keeping code and message verbatim
pub(crate) fn transport_error<E, R>(err: &SdkError<E, R>) -> TransportError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: std::fmt::Debug,
{
    match (err.code(), err.message()) {
        (Some(code), Some(message)) => TransportError::with_code(code, message),
        (Some(code), None) => TransportError::with_code(code, ""),
        _ => TransportError::new(DisplayErrorContext(err).to_string()),
    }
}

/// Run one AWS call under `ctx`, recording duration and outcome
pub(crate) async fn observe<T, F>(
    ctx: &CallContext,
    provider: &'static str,
    operation: &'static str,
    call: F,
) -> Result<T, TransportError>
where
    F: Future<Output = Result<T, TransportError>>,
{
    let start = Instant::now();
    let result = ctx.run(call).await;
    let elapsed = start.elapsed();

    match &result {
        Ok(_) => {
            metrics::record_provider_operation(provider, operation, elapsed.as_secs_f64());
            debug!(
                provider = provider,
                operation = operation,
                duration_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
                "AWS call succeeded"
            );
        }
        Err(e) => {
            metrics::increment_provider_operation_errors(provider, operation);
            debug!(
                provider = provider,
                operation = operation,
                error = %e,
                "AWS call failed"
            );
        }
    }

    result
}
