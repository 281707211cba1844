//! # System Tag Filter
//!
//! Predicate for tag keys owned by the target platform. Reserved keys are never
//! removed or written by the reconciler, even when they appear in a diff.

use crate::constants::AWS_SYSTEM_TAG_PREFIX;
use std::collections::BTreeSet;

/// Reserved tag keys for one target platform
///
/// A key is reserved when it starts with any configured prefix or equals any
/// configured exact key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SystemTagFilter {
    prefixes: BTreeSet<String>,
    keys: BTreeSet<String>,
}

impl SystemTagFilter {
    /// Filter that reserves nothing
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Filter for AWS services: every `aws:` key is reserved
    #[must_use]
    pub fn aws() -> Self {
        Self::none().with_prefix(AWS_SYSTEM_TAG_PREFIX)
    }

    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        if !prefix.is_empty() {
            self.prefixes.insert(prefix);
        }
        self
    }

    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.keys.insert(key.into());
        self
    }

    #[must_use]
    pub fn is_system(&self, key: &str) -> bool {
        self.keys.contains(key) || self.prefixes.iter().any(|p| key.starts_with(p.as_str()))
    }
}
