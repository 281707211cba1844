//! # Constants
//!
//! Shared constants used throughout the reconciler.
//!
//! These values represent reasonable defaults and can be overridden via
//! environment variables where applicable.

/// Tag key prefix owned by AWS itself (`aws:cloudformation:stack-name` and friends)
pub const AWS_SYSTEM_TAG_PREFIX: &str = "aws:";

/// Separator between the secret name and the version rendering in a composite identifier
pub const COMPOSITE_ID_SEPARATOR: &str = "|";

/// Rendering prefix for a version stage selector inside a composite identifier
/// Keeps `ByVersionID("v1")` and `ByVersionStage("v1")` distinct
pub const VERSION_STAGE_RENDER_PREFIX: &str = "stage:";

/// Provider label used in metrics and logs for AWS Secrets Manager
pub const PROVIDER_SECRETS_MANAGER: &str = "aws_secretsmanager";

/// Provider label used in metrics and logs for AWS SSM Parameter Store
pub const PROVIDER_PARAMETER_STORE: &str = "aws_ssm";

/// Error code carried by a transport error raised when the call deadline has passed
pub const DEADLINE_EXCEEDED_CODE: &str = "DeadlineExceeded";

/// Default per-call deadline (seconds), 0 disables the deadline
pub const DEFAULT_CALL_TIMEOUT_SECS: u64 = 0;

/// Default log level when neither `RUST_LOG` nor `LOG_LEVEL` is set
pub const DEFAULT_LOG_LEVEL: &str = "INFO";

/// Default log format (json, text)
pub const DEFAULT_LOG_FORMAT: &str = "text";

/// Environment variable names
pub mod env {
    pub const AWS_REGION: &str = "AWS_REGION";
    pub const AWS_ENDPOINT_URL: &str = "AWS_ENDPOINT_URL";
    pub const SYSTEM_TAG_PREFIXES: &str = "SYSTEM_TAG_PREFIXES";
    pub const CALL_TIMEOUT_SECS: &str = "CALL_TIMEOUT_SECS";
    pub const LOG_LEVEL: &str = "LOG_LEVEL";
    pub const LOG_FORMAT: &str = "LOG_FORMAT";
    pub const LOG_ENABLE_COLOR: &str = "LOG_ENABLE_COLOR";
    pub const ENABLE_METRICS: &str = "ENABLE_METRICS";
}
