//! AWS Resource Reconciler Library
//!
//! Two independent pieces that sit between a declarative resource model and AWS:
//!
//! - [`tags`]: converges a resource's tags to a desired set with at most one untag
//!   and one tag call, never touching platform-reserved (`aws:`) keys.
//! - [`secret`]: resolves a secret name plus an optional version selector into one
//!   GetSecretValue call and a deterministic composite identifier.
//!
//! Both talk to AWS only through the narrow traits in [`provider`].
//!
//! ## Quick Start
//!
//! ```rust
//! use aws_resource_reconciler::prelude::*;
//! ```
//!
//! This brings commonly used types and traits into scope. For more specific imports,
//! use the individual modules.

pub mod config;
pub mod constants;
pub mod context;
pub mod error;
pub mod observability;
pub mod prelude;
pub mod provider;
pub mod secret;
pub mod tags;
