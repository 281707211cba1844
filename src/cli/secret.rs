//! # Secret Commands
//!
//! `arrctl secret get`.

use anyhow::{bail, Result};
use aws_config::SdkConfig;
use aws_resource_reconciler::config::ReconcilerConfig;
use aws_resource_reconciler::context::CallContext;
use aws_resource_reconciler::provider::aws::AwsSecretsManagerValues;
use aws_resource_reconciler::secret::{EphemeralSecret, OpenRequest, Severity};

/// Fetch one secret version through the ephemeral entry point
pub(crate) async fn get_command(
    config: &ReconcilerConfig,
    sdk_config: &SdkConfig,
    secret_id: String,
    version_id: Option<String>,
    version_stage: Option<String>,
    reveal: bool,
) -> Result<()> {
    let ephemeral = EphemeralSecret::new(AwsSecretsManagerValues::new(sdk_config));
    let ctx = CallContext::from_timeout(config.call_timeout());

    let response = ephemeral
        .open(
            &ctx,
            OpenRequest {
                secret_id,
                version_id,
                version_stage,
            },
        )
        .await;

    for diagnostic in &response.diagnostics {
        let level = match diagnostic.severity {
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        eprintln!("{level}: {}: {}", diagnostic.summary, diagnostic.detail);
    }

    let Some(data) = response.result else {
        bail!("secret could not be read");
    };

    println!("{:<14} {}", "ID", data.id);
    println!("{:<14} {}", "ARN", data.arn);
    println!("{:<14} {}", "CREATED", data.created_date);

    if reveal {
        println!("{:<14} {}", "SECRET_STRING", data.secret_string.expose());
        // base64 so non-UTF-8 payloads print losslessly
        println!("{:<14} {}", "SECRET_BINARY", data.secret_binary.to_base64().expose());
    } else {
        println!("{:<14} {}", "SECRET_STRING", data.secret_string);
        println!("{:<14} {}", "SECRET_BINARY", data.secret_binary);
    }

    Ok(())
}
