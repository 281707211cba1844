//! # Tag Diff
//!
//! The filtered difference between an observed and a desired tag set.

use super::{SystemTagFilter, TagSet};

/// Keys to remove and tags to write, with reserved keys already dropped
///
/// `removed` and `updated` are disjoint: a removed key is absent from the desired
/// set, and every updated key comes from it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagDiff {
    /// Keys to untag, sorted
    pub removed: Vec<String>,
    /// Tags to write (new or changed value)
    pub updated: TagSet,
}

impl TagDiff {
    #[must_use]
    pub fn between(observed: &TagSet, desired: &TagSet, filter: &SystemTagFilter) -> Self {
        Self {
            removed: observed.removed(desired).ignore_system(filter).keys(),
            updated: observed.updated(desired).ignore_system(filter),
        }
    }

    /// Nothing to send
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.removed.is_empty() && self.updated.is_empty()
    }
}
