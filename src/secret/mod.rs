//! # Secret
//!
//! Versioned secret resolution.
//!
//! - `selector`: [`VersionSelector`], [`select_version`] and [`compose_identifier`]
//! - `sensitive`: redacted, zeroized payload wrappers
//! - `resolver`: [`SecretResolver`], one GetSecretValue per fetch
//! - `ephemeral`: the structured open-ephemeral-value entry point

mod ephemeral;
mod resolver;
mod selector;
mod sensitive;

pub use ephemeral::{
    AttributeSchema, Diagnostic, EphemeralSecret, EphemeralSecretData, OpenRequest, OpenResponse,
    Severity,
};
pub use resolver::{FetchedSecret, SecretResolver};
pub use selector::{compose_identifier, select_version, VersionSelector};
pub use sensitive::{SensitiveBytes, SensitiveString};
