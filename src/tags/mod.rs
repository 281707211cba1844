//! # Tags
//!
//! Tag set model and the tag reconciler.
//!
//! - `set`: [`TagSet`], the key/value model
//! - `filter`: [`SystemTagFilter`], keys owned by the platform
//! - `diff`: [`TagDiff`], the filtered removed/updated sets
//! - `reconciler`: [`TagReconciler`], `ListTags` and `UpdateTags`

mod diff;
mod filter;
mod reconciler;
mod set;

pub use diff::TagDiff;
pub use filter::SystemTagFilter;
pub use reconciler::TagReconciler;
pub use set::TagSet;
