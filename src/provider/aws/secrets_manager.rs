//! # AWS Secrets Manager
//!
//! Tagging and GetSecretValue against AWS Secrets Manager.
//!
//! Secrets Manager has no ListTagsForResource; the tags of a secret come back
//! on DescribeSecret, which is one call all the same.

use super::{observe, transport_error};
use crate::constants::PROVIDER_SECRETS_MANAGER;
use crate::context::CallContext;
use crate::error::TransportError;
use crate::provider::{
    GetSecretValueRequest, SecretValueOutput, SecretValueTransport, TaggingTransport,
};
use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_secretsmanager::primitives::DateTime as AwsDateTime;
use aws_sdk_secretsmanager::types::Tag;
use aws_sdk_secretsmanager::Client as SecretsManagerClient;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tracing::{debug_span, info_span, Instrument};

/// Tagging transport for Secrets Manager secrets (identifier is the secret ARN or name)
#[derive(Clone)]
pub struct AwsSecretsManagerTagging {
    client: SecretsManagerClient,
}

impl std::fmt::Debug for AwsSecretsManagerTagging {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AwsSecretsManagerTagging").finish_non_exhaustive()
    }
}

impl AwsSecretsManagerTagging {
    #[must_use]
    pub fn new(sdk_config: &SdkConfig) -> Self {
        Self::from_client(SecretsManagerClient::new(sdk_config))
    }

    #[must_use]
    pub fn from_client(client: SecretsManagerClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TaggingTransport for AwsSecretsManagerTagging {
    async fn list_tags_for_resource(
        &self,
        ctx: &CallContext,
        identifier: &str,
    ) -> Result<HashMap<String, String>, TransportError> {
        let span = debug_span!("aws.secretsmanager.describe_secret", resource.id = identifier);
        observe(ctx, PROVIDER_SECRETS_MANAGER, "describe_secret", async {
            let output = self
                .client
                .describe_secret()
                .secret_id(identifier)
                .send()
                .await
                .map_err(|e| transport_error(&e))?;

            Ok(output
                .tags()
                .iter()
                .filter_map(|tag| {
                    tag.key()
                        .map(|k| (k.to_string(), tag.value().unwrap_or_default().to_string()))
                })
                .collect())
        })
        .instrument(span)
        .await
    }

    async fn untag_resource(
        &self,
        ctx: &CallContext,
        identifier: &str,
        keys: &[String],
    ) -> Result<(), TransportError> {
        let span = info_span!("aws.secretsmanager.untag_resource", resource.id = identifier);
        observe(ctx, PROVIDER_SECRETS_MANAGER, "untag_resource", async {
            self.client
                .untag_resource()
                .secret_id(identifier)
                .set_tag_keys(Some(keys.to_vec()))
                .send()
                .await
                .map_err(|e| transport_error(&e))?;
            Ok(())
        })
        .instrument(span)
        .await
    }

    async fn tag_resource(
        &self,
        ctx: &CallContext,
        identifier: &str,
        tags: &HashMap<String, String>,
    ) -> Result<(), TransportError> {
        let span = info_span!("aws.secretsmanager.tag_resource", resource.id = identifier);
        let tags: Vec<Tag> = tags
            .iter()
            .map(|(k, v)| Tag::builder().key(k).value(v).build())
            .collect();

        observe(ctx, PROVIDER_SECRETS_MANAGER, "tag_resource", async {
            self.client
                .tag_resource()
                .secret_id(identifier)
                .set_tags(Some(tags))
                .send()
                .await
                .map_err(|e| transport_error(&e))?;
            Ok(())
        })
        .instrument(span)
        .await
    }
}

/// GetSecretValue transport for Secrets Manager
#[derive(Clone)]
pub struct AwsSecretsManagerValues {
    client: SecretsManagerClient,
}

impl std::fmt::Debug for AwsSecretsManagerValues {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AwsSecretsManagerValues").finish_non_exhaustive()
    }
}

impl AwsSecretsManagerValues {
    #[must_use]
    pub fn new(sdk_config: &SdkConfig) -> Self {
        Self::from_client(SecretsManagerClient::new(sdk_config))
    }

    #[must_use]
    pub fn from_client(client: SecretsManagerClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SecretValueTransport for AwsSecretsManagerValues {
    async fn get_secret_value(
        &self,
        ctx: &CallContext,
        request: &GetSecretValueRequest,
    ) -> Result<SecretValueOutput, TransportError> {
        let span = debug_span!(
            "aws.secretsmanager.get_secret_value",
            secret.name = %request.secret_id
        );
        observe(ctx, PROVIDER_SECRETS_MANAGER, "get_secret_value", async {
            let output = self
                .client
                .get_secret_value()
                .secret_id(&request.secret_id)
                .set_version_id(request.version_id.clone())
                .set_version_stage(request.version_stage.clone())
                .send()
                .await
                .map_err(|e| transport_error(&e))?;

            Ok(SecretValueOutput {
                arn: output.arn().map(ToString::to_string),
                created_date: output.created_date().and_then(to_chrono),
                secret_binary: output.secret_binary().map(|blob| blob.as_ref().to_vec()),
                secret_string: output.secret_string().map(ToString::to_string),
            })
        })
        .instrument(span)
        .await
    }
}

fn to_chrono(value: &AwsDateTime) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(value.secs(), value.subsec_nanos())
}
