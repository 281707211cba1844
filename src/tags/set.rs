//! # Tag Set
//!
//! Immutable key/value tag mapping.
//!
//! Backed by a `BTreeMap` so anything emitted as a list (keys to remove) comes
//! out sorted and stable across runs.

use super::SystemTagFilter;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Key/value tags attached to a remote resource
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagSet(BTreeMap<String, String>);

impl TagSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Keys in sorted order
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.0.keys().cloned().collect()
    }

    /// Tags present here whose key is absent from `desired`
    #[must_use]
    pub fn removed(&self, desired: &TagSet) -> TagSet {
        self.0
            .iter()
            .filter(|(k, _)| !desired.0.contains_key(*k))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Tags in `desired` that are new here or carry a different value
    #[must_use]
    pub fn updated(&self, desired: &TagSet) -> TagSet {
        desired
            .0
            .iter()
            .filter(|(k, v)| self.0.get(*k) != Some(*v))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Drop every tag whose key is reserved by the platform
    #[must_use]
    pub fn ignore_system(&self, filter: &SystemTagFilter) -> TagSet {
        self.0
            .iter()
            .filter(|(k, _)| !filter.is_system(k))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Tags for a tagging request, `None` when there is nothing to send
    #[must_use]
    pub fn into_request_map(self) -> Option<HashMap<String, String>> {
        (!self.is_empty()).then(|| self.0.into_iter().collect())
    }
}

impl<K, V> FromIterator<(K, V)> for TagSet
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl From<HashMap<String, String>> for TagSet {
    fn from(map: HashMap<String, String>) -> Self {
        Self(map.into_iter().collect())
    }
}

impl From<BTreeMap<String, String>> for TagSet {
    fn from(map: BTreeMap<String, String>) -> Self {
        Self(map)
    }
}

impl From<TagSet> for HashMap<String, String> {
    fn from(tags: TagSet) -> Self {
        tags.0.into_iter().collect()
    }
}

impl IntoIterator for TagSet {
    type Item = (String, String);
    type IntoIter = std::collections::btree_map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
