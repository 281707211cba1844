//! # Tags Commands
//!
//! `arrctl tags list` and `arrctl tags apply`.

use super::Service;
use anyhow::{Context, Result};
use aws_config::SdkConfig;
use aws_resource_reconciler::config::ReconcilerConfig;
use aws_resource_reconciler::context::CallContext;
use aws_resource_reconciler::provider::aws::{AwsParameterStoreTagging, AwsSecretsManagerTagging};
use aws_resource_reconciler::provider::TaggingTransport;
use aws_resource_reconciler::tags::{TagReconciler, TagSet};
use std::sync::Arc;

/// Parse a `KEY=VALUE` argument; the value may be empty or contain `=`
pub(crate) fn parse_tag(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{raw}'")),
    }
}

fn reconciler(
    config: &ReconcilerConfig,
    sdk_config: &SdkConfig,
    service: Service,
) -> TagReconciler<Arc<dyn TaggingTransport>> {
    let transport: Arc<dyn TaggingTransport> = match service {
        Service::Secretsmanager => Arc::new(AwsSecretsManagerTagging::new(sdk_config)),
        Service::Ssm => Arc::new(AwsParameterStoreTagging::new(sdk_config)),
    };
    TagReconciler::new(transport, config.system_tag_filter())
}

fn print_tags(tags: &TagSet) {
    if tags.is_empty() {
        println!("No tags found.");
        return;
    }
    println!("{:<40} VALUE", "KEY");
    println!("{}", "-".repeat(60));
    for (key, value) in tags.iter() {
        println!("{key:<40} {value}");
    }
}

/// List the tags on a resource
pub(crate) async fn list_command(
    config: &ReconcilerConfig,
    sdk_config: &SdkConfig,
    service: Service,
    identifier: &str,
) -> Result<()> {
    let reconciler = reconciler(config, sdk_config, service);
    let ctx = CallContext::from_timeout(config.call_timeout());

    let tags = reconciler
        .list_tags(&ctx, identifier)
        .await
        .with_context(|| format!("Failed to list tags for {identifier}"))?;

    print_tags(&tags);
    Ok(())
}

/// Read the current tags, then converge them to `desired`
pub(crate) async fn apply_command(
    config: &ReconcilerConfig,
    sdk_config: &SdkConfig,
    service: Service,
    identifier: &str,
    desired: Vec<(String, String)>,
    dry_run: bool,
) -> Result<()> {
    let reconciler = reconciler(config, sdk_config, service);
    let desired: TagSet = desired.into_iter().collect();

    let observed = reconciler
        .list_tags(&CallContext::from_timeout(config.call_timeout()), identifier)
        .await
        .with_context(|| format!("Failed to list tags for {identifier}"))?;

    let plan = reconciler.plan(&observed, &desired);
    if plan.is_empty() {
        println!("Tags on {identifier} are up to date.");
        return Ok(());
    }

    for key in &plan.removed {
        println!("- {key}");
    }
    for (key, value) in plan.updated.iter() {
        match observed.get(key) {
            Some(old) => println!("~ {key}: {old} -> {value}"),
            None => println!("+ {key}: {value}"),
        }
    }

    if dry_run {
        println!("Dry run, no changes applied.");
        return Ok(());
    }

    reconciler
        .update_tags(
            &CallContext::from_timeout(config.call_timeout()),
            identifier,
            &observed,
            &desired,
        )
        .await?;

    println!("Tags on {identifier} updated.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tag() {
        assert_eq!(parse_tag("env=prod"), Ok(("env".into(), "prod".into())));
        assert_eq!(parse_tag("empty="), Ok(("empty".into(), String::new())));
        assert_eq!(parse_tag("url=a=b"), Ok(("url".into(), "a=b".into())));
        assert!(parse_tag("=value").is_err());
        assert!(parse_tag("novalue").is_err());
    }
}
