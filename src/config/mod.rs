//! # Configuration
//!
//! Runtime settings for the reconciler and resolver.
//!
//! - `reconciler`: settings loaded from environment variables with defaults

mod reconciler;

pub use reconciler::ReconcilerConfig;
