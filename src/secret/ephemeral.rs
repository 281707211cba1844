//! # Ephemeral Secret
//!
//! Structured entry point for opening an `aws_secretsmanager_secret` ephemeral value.
//!
//! The request names a secret and optionally one version selector. The response
//! carries the fetched version or diagnostics. The result is meant for one operation
//! only and must never be written to persisted configuration state.

use super::resolver::SecretResolver;
use super::selector::{compose_identifier, select_version};
use super::sensitive::{SensitiveBytes, SensitiveString};
use crate::context::CallContext;
use crate::error::Error;
use crate::provider::SecretValueTransport;
use serde::Deserialize;
use tracing::{info_span, Instrument};

/// Open request, as supplied by the caller's configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OpenRequest {
    #[serde(default)]
    pub secret_id: String,
    #[serde(default)]
    pub version_id: Option<String>,
    #[serde(default)]
    pub version_stage: Option<String>,
}

/// Computed attributes of an opened secret version
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EphemeralSecretData {
    pub secret_id: String,
    pub version_id: Option<String>,
    pub version_stage: Option<String>,
    /// Composite identifier of the opened version
    pub id: String,
    pub arn: String,
    /// RFC3339 timestamp
    pub created_date: String,
    /// Raw bytes, exactly as returned
    pub secret_binary: SensitiveBytes,
    pub secret_string: SensitiveString,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

/// A problem reported back to the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub summary: String,
    pub detail: String,
}

impl Diagnostic {
    pub fn error(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            summary: summary.into(),
            detail: detail.into(),
        }
    }

    pub fn warning(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            summary: summary.into(),
            detail: detail.into(),
        }
    }
}

/// Result of `open`: data on success, plus any diagnostics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpenResponse {
    pub result: Option<EphemeralSecretData>,
    pub diagnostics: Vec<Diagnostic>,
}

impl OpenResponse {
    #[must_use]
    pub fn has_error(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }
}

/// One attribute of the ephemeral value's schema
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeSchema {
    pub name: &'static str,
    pub required: bool,
    pub optional: bool,
    pub computed: bool,
    pub sensitive: bool,
}

impl AttributeSchema {
    const fn input(name: &'static str, required: bool) -> Self {
        Self {
            name,
            required,
            optional: !required,
            computed: false,
            sensitive: false,
        }
    }

    const fn computed(name: &'static str, sensitive: bool) -> Self {
        Self {
            name,
            required: false,
            optional: false,
            computed: true,
            sensitive,
        }
    }
}

const SCHEMA: [AttributeSchema; 7] = [
    AttributeSchema::input("secret_id", true),
    AttributeSchema::input("version_id", false),
    AttributeSchema::input("version_stage", false),
    AttributeSchema::computed("arn", false),
    AttributeSchema::computed("created_date", false),
    AttributeSchema::computed("secret_binary", true),
    AttributeSchema::computed("secret_string", true),
];

/// The `aws_secretsmanager_secret` ephemeral value
#[derive(Debug, Clone)]
pub struct EphemeralSecret<T> {
    resolver: SecretResolver<T>,
}

impl<T: SecretValueTransport> EphemeralSecret<T> {
    pub const TYPE_NAME: &'static str = "aws_secretsmanager_secret";

    pub fn new(transport: T) -> Self {
        Self {
            resolver: SecretResolver::new(transport),
        }
    }

    #[must_use]
    pub fn schema() -> &'static [AttributeSchema] {
        &SCHEMA
    }

    /// Fetch the requested secret version
    pub async fn open(&self, ctx: &CallContext, request: OpenRequest) -> OpenResponse {
        let mut response = OpenResponse::default();

        if request.secret_id.is_empty() {
            response.diagnostics.push(Diagnostic::error(
                "Missing required argument",
                "The argument \"secret_id\" is required, but no definition was found.",
            ));
            return response;
        }

        let selector = select_version(
            request.version_id.as_deref(),
            request.version_stage.as_deref(),
        );
        let both_supplied = request.version_id.as_deref().is_some_and(|v| !v.is_empty())
            && request.version_stage.as_deref().is_some_and(|v| !v.is_empty());
        if both_supplied {
            response.diagnostics.push(Diagnostic::warning(
                "Conflicting version selectors",
                "Both \"version_id\" and \"version_stage\" are set; \"version_stage\" is ignored.",
            ));
        }

        let id = compose_identifier(&request.secret_id, &selector);
        let span = info_span!("secret.open", type_name = Self::TYPE_NAME, secret.id = %id);

        let fetched = self
            .resolver
            .fetch(ctx, &request.secret_id, &selector)
            .instrument(span)
            .await;

        match fetched {
            Ok(secret) => {
                response.result = Some(EphemeralSecretData {
                    created_date: secret.created_date_rfc3339(),
                    secret_binary: secret.secret_binary,
                    secret_string: secret.secret_string,
                    id: secret.id,
                    arn: secret.arn,
                    secret_id: request.secret_id,
                    version_id: request.version_id,
                    version_stage: request.version_stage,
                });
            }
            Err(Error::ReadSecret { id, source }) => {
                response.diagnostics.push(Diagnostic::error(
                    format!("failed reading secret ({id})"),
                    source.to_string(),
                ));
            }
            Err(e) => {
                response
                    .diagnostics
                    .push(Diagnostic::error(format!("failed reading secret ({id})"), e.to_string()));
            }
        }

        response
    }
}
