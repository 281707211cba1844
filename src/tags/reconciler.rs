//! # Tag Reconciler
//!
//! Converges a remote resource's tags to a desired set with at most two calls:
//! one untag for keys no longer desired, then one tag for new or changed values.
//! Reserved keys are dropped from both calls.
//!
//! A failed untag stops the reconciliation before the tag call. A failed tag call
//! leaves the removals in place; calling `update_tags` again converges, since the
//! operation is idempotent at the tag-set level.

use super::{SystemTagFilter, TagDiff, TagSet};
use crate::context::CallContext;
use crate::error::{Error, Result, TransportError};
use crate::observability::metrics;
use crate::provider::TaggingTransport;
use tracing::{debug, info, info_span, warn, Instrument};

/// Tag reconciler for one target platform
#[derive(Debug, Clone)]
pub struct TagReconciler<T> {
    transport: T,
    filter: SystemTagFilter,
}

impl<T: TaggingTransport> TagReconciler<T> {
    pub fn new(transport: T, filter: SystemTagFilter) -> Self {
        Self { transport, filter }
    }

    /// Read the tags currently attached to `identifier`
    ///
    /// The transport error is returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns the transport's listing failure.
    pub async fn read(
        &self,
        ctx: &CallContext,
        identifier: &str,
    ) -> Result<TagSet, TransportError> {
        let tags = self.transport.list_tags_for_resource(ctx, identifier).await?;
        Ok(TagSet::from(tags))
    }

    /// `ListTags`: read the observed tags and hand them back to the caller
    ///
    /// The returned set is what a read/import flow records as the resource's current
    /// tags; no second remote call is needed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`] carrying the listing failure unchanged.
    pub async fn list_tags(&self, ctx: &CallContext, identifier: &str) -> Result<TagSet> {
        let span = info_span!("tags.list", resource.id = identifier);
        async move {
            let tags = self.read(ctx, identifier).await?;
            debug!(tag_count = tags.len(), "Listed resource tags");
            Ok(tags)
        }
        .instrument(span)
        .await
    }

    /// `UpdateTags`: converge `identifier` from `old_tags` to `new_tags`
    ///
    /// # Errors
    ///
    /// Returns [`Error::Untag`] if the removal call fails (the tag call is then never
    /// issued), or [`Error::Tag`] if the tag call fails.
    pub async fn update_tags(
        &self,
        ctx: &CallContext,
        identifier: &str,
        old_tags: &TagSet,
        new_tags: &TagSet,
    ) -> Result<()> {
        let span = info_span!("tags.update", resource.id = identifier);
        async move {
            let result = self.apply(ctx, identifier, old_tags, new_tags).await;
            match &result {
                Ok(true) => metrics::record_reconciliation("applied"),
                Ok(false) => metrics::record_reconciliation("unchanged"),
                Err(e) => {
                    metrics::record_reconciliation("failed");
                    warn!(error = %e, "Tag reconciliation failed");
                }
            }
            result.map(|_| ())
        }
        .instrument(span)
        .await
    }

    /// Returns whether any remote call was made
    async fn apply(
        &self,
        ctx: &CallContext,
        identifier: &str,
        old_tags: &TagSet,
        new_tags: &TagSet,
    ) -> Result<bool> {
        let TagDiff { removed, updated } = self.plan(old_tags, new_tags);

        if removed.is_empty() {
            debug!("No tags to remove, skipping untag");
        } else {
            info!(key_count = removed.len(), keys = ?removed, "Untagging resource");
            self.transport
                .untag_resource(ctx, identifier, &removed)
                .await
                .map_err(|source| Error::Untag {
                    identifier: identifier.to_string(),
                    source,
                })?;
        }

        let untagged = !removed.is_empty();
        // Values can be sensitive; only keys are logged
        let keys = updated.keys();
        match updated.into_request_map() {
            None => {
                debug!("No tags to add or change, skipping tag");
                Ok(untagged)
            }
            Some(tags) => {
                info!(key_count = keys.len(), keys = ?keys, "Tagging resource");
                self.transport
                    .tag_resource(ctx, identifier, &tags)
                    .await
                    .map_err(|source| Error::Tag {
                        identifier: identifier.to_string(),
                        source,
                    })?;
                Ok(true)
            }
        }
    }

    /// The filtered diff `update_tags` would apply, without calling the transport
    #[must_use]
    pub fn plan(&self, old_tags: &TagSet, new_tags: &TagSet) -> TagDiff {
        TagDiff::between(old_tags, new_tags, &self.filter)
    }
}
