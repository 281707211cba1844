//! # Version Selector
//!
//! Which version of a secret to read, and the composite identifier built from it.

use crate::constants::{COMPOSITE_ID_SEPARATOR, VERSION_STAGE_RENDER_PREFIX};
use crate::provider::GetSecretValueRequest;
use tracing::warn;

/// Version of a secret to fetch
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum VersionSelector {
    /// Whatever the service returns by default (the `AWSCURRENT` stage on AWS)
    #[default]
    None,
    /// An opaque version identifier
    ByVersionId(String),
    /// A named stage label such as `AWSCURRENT` or `AWSPREVIOUS`
    ByVersionStage(String),
}

impl VersionSelector {
    /// Rendering used inside a composite identifier
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            VersionSelector::None => String::new(),
            VersionSelector::ByVersionId(id) => id.clone(),
            VersionSelector::ByVersionStage(stage) => {
                format!("{VERSION_STAGE_RENDER_PREFIX}{stage}")
            }
        }
    }

    /// GetSecretValue request for `secret_name`, with at most one version field set
    #[must_use]
    pub fn request_for(&self, secret_name: &str) -> GetSecretValueRequest {
        let mut request = GetSecretValueRequest {
            secret_id: secret_name.to_string(),
            ..GetSecretValueRequest::default()
        };
        match self {
            VersionSelector::None => {}
            VersionSelector::ByVersionId(id) => request.version_id = Some(id.clone()),
            VersionSelector::ByVersionStage(stage) => {
                request.version_stage = Some(stage.clone());
            }
        }
        request
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Pick the selector from the raw optional inputs
///
/// A version ID wins whenever both are supplied; the stage is then ignored and a
/// warning is logged. Empty strings count as absent.
#[must_use]
pub fn select_version(version_id: Option<&str>, version_stage: Option<&str>) -> VersionSelector {
    match (present(version_id), present(version_stage)) {
        (Some(id), stage) => {
            if let Some(stage) = stage {
                warn!(
                    version_id = id,
                    version_stage = stage,
                    "Both version_id and version_stage supplied, version_stage is ignored"
                );
            }
            VersionSelector::ByVersionId(id.to_string())
        }
        (None, Some(stage)) => VersionSelector::ByVersionStage(stage.to_string()),
        (None, None) => VersionSelector::None,
    }
}

/// Composite identifier for a secret version: `<name>|<selector rendering>`
///
/// Pure and deterministic; the same value is used as the fetched version's identity
/// and in error messages.
#[must_use]
pub fn compose_identifier(secret_name: &str, selector: &VersionSelector) -> String {
    format!("{secret_name}{COMPOSITE_ID_SEPARATOR}{}", selector.render())
}
