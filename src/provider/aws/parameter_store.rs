//! # AWS Parameter Store Tagging
//!
//! Tagging transport for AWS Systems Manager Parameter Store parameters.
//!
//! SSM tags are addressed by resource type plus resource id; this transport always
//! uses the `Parameter` resource type with the parameter name as the identifier.

use super::{observe, transport_error};
use crate::constants::PROVIDER_PARAMETER_STORE;
use crate::context::CallContext;
use crate::error::TransportError;
use crate::provider::TaggingTransport;
use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_ssm::types::{ResourceTypeForTagging, Tag};
use aws_sdk_ssm::Client as SsmClient;
use std::collections::HashMap;
use tracing::{debug_span, info_span, Instrument};

/// Tagging transport for SSM parameters
#[derive(Clone)]
pub struct AwsParameterStoreTagging {
    client: SsmClient,
}

impl std::fmt::Debug for AwsParameterStoreTagging {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AwsParameterStoreTagging").finish_non_exhaustive()
    }
}

impl AwsParameterStoreTagging {
    #[must_use]
    pub fn new(sdk_config: &SdkConfig) -> Self {
        Self::from_client(SsmClient::new(sdk_config))
    }

    #[must_use]
    pub fn from_client(client: SsmClient) -> Self {
        Self { client }
    }
}

fn build_tags(tags: &HashMap<String, String>) -> Result<Vec<Tag>, TransportError> {
    tags.iter()
        .map(|(k, v)| {
            Tag::builder()
                .key(k)
                .value(v)
                .build()
                .map_err(|e| TransportError::new(format!("invalid tag {k}: {e}")))
        })
        .collect()
}

#[async_trait]
impl TaggingTransport for AwsParameterStoreTagging {
    async fn list_tags_for_resource(
        &self,
        ctx: &CallContext,
        identifier: &str,
    ) -> Result<HashMap<String, String>, TransportError> {
        let span = debug_span!("aws.ssm.list_tags_for_resource", resource.id = identifier);
        observe(ctx, PROVIDER_PARAMETER_STORE, "list_tags_for_resource", async {
            let output = self
                .client
                .list_tags_for_resource()
                .resource_type(ResourceTypeForTagging::Parameter)
                .resource_id(identifier)
                .send()
                .await
                .map_err(|e| transport_error(&e))?;

            Ok(output
                .tag_list()
                .iter()
                .map(|tag| (tag.key().to_string(), tag.value().to_string()))
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
        let span = info_span!("aws.ssm.remove_tags_from_resource", resource.id = identifier);
        observe(ctx, PROVIDER_PARAMETER_STORE, "remove_tags_from_resource", async {
            self.client
                .remove_tags_from_resource()
                .resource_type(ResourceTypeForTagging::Parameter)
                .resource_id(identifier)
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
        let span = info_span!("aws.ssm.add_tags_to_resource", resource.id = identifier);
        let tags = build_tags(tags)?;

        observe(ctx, PROVIDER_PARAMETER_STORE, "add_tags_to_resource", async {
            self.client
                .add_tags_to_resource()
                .resource_type(ResourceTypeForTagging::Parameter)
                .resource_id(identifier)
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
