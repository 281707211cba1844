//! # Reconciler Configuration
//!
//! Settings loaded from environment variables.

use crate::constants::{self, env};
use crate::tags::SystemTagFilter;
use std::time::Duration;

/// Reconciler-level configuration
///
/// All settings have sensible defaults and can be overridden via environment variables.
#[derive(Debug, Clone)]
pub struct ReconcilerConfig {
    /// AWS region override
    /// When unset the default AWS provider chain decides
    pub region: Option<String>,
    /// Endpoint URL override applied to every AWS client
    /// Used to point the SDK at a local mock (e.g. LocalStack)
    pub endpoint_url: Option<String>,
    /// Additional reserved tag key prefixes on top of `aws:`
    pub extra_system_tag_prefixes: Vec<String>,
    /// Deadline applied to each remote call (seconds), 0 disables it
    pub call_timeout_secs: u64,
    /// Global log level (ERROR, WARN, INFO, DEBUG, TRACE)
    pub log_level: String,
    /// Log format (json, text)
    pub log_format: String,
    /// Enable color in text format logs
    pub log_enable_color: bool,
    /// Enable metrics collection
    pub enable_metrics: bool,
}

impl Default for ReconcilerConfig {
    fn default() -> Self {
        Self {
            region: None,
            endpoint_url: None,
            extra_system_tag_prefixes: Vec::new(),
            call_timeout_secs: constants::DEFAULT_CALL_TIMEOUT_SECS,
            log_level: constants::DEFAULT_LOG_LEVEL.to_string(),
            log_format: constants::DEFAULT_LOG_FORMAT.to_string(),
            log_enable_color: true,
            enable_metrics: true,
        }
    }
}

impl ReconcilerConfig {
    /// Load configuration from environment variables with defaults
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    ///
    /// `from_env` delegates here; tests pass a map instead of mutating the process env.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            region: non_empty(lookup(env::AWS_REGION)),
            endpoint_url: non_empty(lookup(env::AWS_ENDPOINT_URL)),
            extra_system_tag_prefixes: lookup(env::SYSTEM_TAG_PREFIXES)
                .map(|v| parse_list(&v))
                .unwrap_or_default(),
            call_timeout_secs: parse_or(lookup(env::CALL_TIMEOUT_SECS), defaults.call_timeout_secs),
            log_level: lookup(env::LOG_LEVEL).unwrap_or(defaults.log_level),
            log_format: lookup(env::LOG_FORMAT).unwrap_or(defaults.log_format),
            log_enable_color: parse_bool_or(
                lookup(env::LOG_ENABLE_COLOR),
                defaults.log_enable_color,
            ),
            enable_metrics: parse_bool_or(lookup(env::ENABLE_METRICS), defaults.enable_metrics),
        }
    }

    /// Per-call deadline, `None` when disabled
    #[must_use]
    pub fn call_timeout(&self) -> Option<Duration> {
        (self.call_timeout_secs > 0).then(|| Duration::from_secs(self.call_timeout_secs))
    }

    /// System tag filter for AWS plus any configured extra prefixes
    #[must_use]
    pub fn system_tag_filter(&self) -> SystemTagFilter {
        self.extra_system_tag_prefixes
            .iter()
            .fold(SystemTagFilter::aws(), |filter, prefix| {
                filter.with_prefix(prefix.as_str())
            })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .collect()
}

fn parse_or<T: std::str::FromStr>(value: Option<String>, default: T) -> T {
    value.and_then(|v| v.trim().parse().ok()).unwrap_or(default)
}

fn parse_bool_or(value: Option<String>, default: bool) -> bool {
    value
        .map(|v| {
            let v_lower = v.to_lowercase();
            v_lower == "true" || v_lower == "1" || v_lower == "yes" || v_lower == "on"
        })
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_env_empty() {
        let config = ReconcilerConfig::from_lookup(|_| None);
        assert!(config.region.is_none());
        assert!(config.endpoint_url.is_none());
        assert!(config.call_timeout().is_none());
        assert_eq!(config.log_level, "INFO");
        assert_eq!(config.log_format, "text");
        assert!(config.enable_metrics);
    }

    #[test]
    fn test_values_read_from_lookup() {
        let config = ReconcilerConfig::from_lookup(lookup_from(&[
            ("AWS_REGION", "eu-west-1"),
            ("AWS_ENDPOINT_URL", "http://localhost:4566"),
            ("SYSTEM_TAG_PREFIXES", "corp:, internal: ,"),
            ("CALL_TIMEOUT_SECS", "15"),
            ("LOG_FORMAT", "json"),
            ("ENABLE_METRICS", "off"),
        ]));

        assert_eq!(config.region.as_deref(), Some("eu-west-1"));
        assert_eq!(config.endpoint_url.as_deref(), Some("http://localhost:4566"));
        assert_eq!(config.extra_system_tag_prefixes, vec!["corp:", "internal:"]);
        assert_eq!(config.call_timeout(), Some(Duration::from_secs(15)));
        assert_eq!(config.log_format, "json");
        assert!(!config.enable_metrics);
    }

    #[test]
    fn test_blank_region_is_ignored() {
        let config = ReconcilerConfig::from_lookup(lookup_from(&[("AWS_REGION", "  ")]));
        assert!(config.region.is_none());
    }

    #[test]
    fn test_invalid_timeout_falls_back_to_default() {
        let config =
            ReconcilerConfig::from_lookup(lookup_from(&[("CALL_TIMEOUT_SECS", "soon")]));
        assert_eq!(config.call_timeout_secs, 0);
    }

    #[test]
    fn test_system_tag_filter_includes_extra_prefixes() {
        let config = ReconcilerConfig::from_lookup(lookup_from(&[("SYSTEM_TAG_PREFIXES", "corp:")]));
        let filter = config.system_tag_filter();
        assert!(filter.is_system("aws:cloudformation:stack-name"));
        assert!(filter.is_system("corp:owner"));
        assert!(!filter.is_system("team"));
    }
}
