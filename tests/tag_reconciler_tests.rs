//! # Tag Reconciler Tests
//!
//! Drives `TagReconciler` against the recording fake transport.
//!
//! These tests verify:
//! - Which remote calls `update_tags` issues, and in what order
//! - Reserved `aws:` keys never reach the transport
//! - Error wrapping for untag and tag failures, and passthrough for listing
//! - The caller's `CallContext` reaches every remote call unchanged

mod common;

use aws_resource_reconciler::context::CallContext;
use aws_resource_reconciler::error::{Error, TransportError};
use aws_resource_reconciler::tags::{SystemTagFilter, TagReconciler, TagSet};
use common::{map, FakeTagging, TagCall};
use std::time::Duration;

const ARN: &str = "arn:aws:secretsmanager:us-east-1:123456789012:secret:db-AbCdEf";

fn tags(pairs: &[(&str, &str)]) -> TagSet {
    pairs.iter().copied().collect()
}

fn reconciler(fake: &FakeTagging) -> TagReconciler<FakeTagging> {
    TagReconciler::new(fake.clone(), SystemTagFilter::aws())
}

#[tokio::test]
async fn test_update_untags_then_tags() {
    let fake = FakeTagging::with_remote(&[("a", "1"), ("b", "2")]);
    let ctx = CallContext::background();

    reconciler(&fake)
        .update_tags(
            &ctx,
            ARN,
            &tags(&[("a", "1"), ("b", "2")]),
            &tags(&[("b", "3"), ("c", "4")]),
        )
        .await
        .unwrap();

    assert_eq!(
        fake.calls(),
        vec![
            TagCall::Untag(ARN.to_string(), vec!["a".to_string()]),
            TagCall::Tag(ARN.to_string(), map(&[("b", "3"), ("c", "4")])),
        ]
    );
    assert_eq!(fake.remote(), map(&[("b", "3"), ("c", "4")]));
}

#[tokio::test]
async fn test_update_with_only_system_tags_makes_no_calls() {
    let fake = FakeTagging::default();
    let ctx = CallContext::background();

    reconciler(&fake)
        .update_tags(
            &ctx,
            ARN,
            &tags(&[("aws:cloudformation:stack-name", "x")]),
            &TagSet::new(),
        )
        .await
        .unwrap();

    assert!(fake.calls().is_empty());
}

#[tokio::test]
async fn test_update_is_idempotent() {
    let fake = FakeTagging::default();
    let ctx = CallContext::background();
    let same = tags(&[("env", "prod"), ("team", "core")]);

    reconciler(&fake)
        .update_tags(&ctx, ARN, &same, &same)
        .await
        .unwrap();

    assert!(fake.calls().is_empty(), "equal sets must not call the transport");
}

#[tokio::test]
async fn test_update_only_additions_skips_untag() {
    let fake = FakeTagging::default();
    let ctx = CallContext::background();

    reconciler(&fake)
        .update_tags(&ctx, ARN, &TagSet::new(), &tags(&[("env", "prod")]))
        .await
        .unwrap();

    assert_eq!(
        fake.calls(),
        vec![TagCall::Tag(ARN.to_string(), map(&[("env", "prod")]))]
    );
}

#[tokio::test]
async fn test_update_only_removals_skips_tag() {
    let fake = FakeTagging::with_remote(&[("env", "prod"), ("old", "x")]);
    let ctx = CallContext::background();

    reconciler(&fake)
        .update_tags(
            &ctx,
            ARN,
            &tags(&[("env", "prod"), ("old", "x")]),
            &tags(&[("env", "prod")]),
        )
        .await
        .unwrap();

    assert_eq!(
        fake.calls(),
        vec![TagCall::Untag(ARN.to_string(), vec!["old".to_string()])]
    );
}

#[tokio::test]
async fn test_system_keys_never_sent() {
    let fake = FakeTagging::default();
    let ctx = CallContext::background();

    reconciler(&fake)
        .update_tags(
            &ctx,
            ARN,
            &tags(&[("aws:old", "1"), ("keep", "1"), ("drop", "1")]),
            &tags(&[("aws:new", "2"), ("keep", "2")]),
        )
        .await
        .unwrap();

    for call in fake.calls() {
        match call {
            TagCall::Untag(_, keys) => {
                assert_eq!(keys, vec!["drop".to_string()]);
            }
            TagCall::Tag(_, sent) => {
                assert_eq!(sent, map(&[("keep", "2")]));
            }
            TagCall::List(_) => panic!("update_tags must not list"),
        }
    }
    assert_eq!(fake.calls().len(), 2);
}

#[tokio::test]
async fn test_extra_system_prefix_is_excluded() {
    let fake = FakeTagging::default();
    let ctx = CallContext::background();
    let reconciler = TagReconciler::new(
        fake.clone(),
        SystemTagFilter::aws().with_prefix("kubernetes.io/"),
    );

    reconciler
        .update_tags(
            &ctx,
            ARN,
            &TagSet::new(),
            &tags(&[("kubernetes.io/cluster", "main"), ("env", "dev")]),
        )
        .await
        .unwrap();

    assert_eq!(
        fake.calls(),
        vec![TagCall::Tag(ARN.to_string(), map(&[("env", "dev")]))]
    );
}

#[tokio::test]
async fn test_untag_failure_stops_before_tag() {
    let fake = FakeTagging {
        fail_untag: Some(TransportError::with_code("AccessDeniedException", "denied")),
        ..FakeTagging::default()
    };
    let ctx = CallContext::background();

    let err = reconciler(&fake)
        .update_tags(&ctx, ARN, &tags(&[("a", "1")]), &tags(&[("b", "2")]))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Untag { .. }));
    assert_eq!(
        err.to_string(),
        format!("untagging resource ({ARN}): AccessDeniedException: denied")
    );
    assert_eq!(fake.calls().len(), 1, "tag must not be attempted");
}

#[tokio::test]
async fn test_tag_failure_is_wrapped() {
    let fake = FakeTagging {
        fail_tag: Some(TransportError::new("throttled")),
        ..FakeTagging::default()
    };
    let ctx = CallContext::background();

    let err = reconciler(&fake)
        .update_tags(&ctx, ARN, &tags(&[("a", "1")]), &tags(&[("b", "2")]))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Tag { .. }));
    assert_eq!(err.to_string(), format!("tagging resource ({ARN}): throttled"));
    assert_eq!(err.transport(), Some(&TransportError::new("throttled")));
    // removal already applied
    assert_eq!(fake.calls().len(), 2);
}

#[tokio::test]
async fn test_retry_after_tag_failure_converges() {
    let failing = FakeTagging {
        fail_tag: Some(TransportError::new("throttled")),
        ..FakeTagging::with_remote(&[("a", "1")])
    };
    let ctx = CallContext::background();
    let desired = tags(&[("b", "2")]);

    let _ = reconciler(&failing)
        .update_tags(&ctx, ARN, &tags(&[("a", "1")]), &desired)
        .await;

    let healthy = FakeTagging {
        remote: failing.remote.clone(),
        ..FakeTagging::default()
    };
    let reconciler = reconciler(&healthy);
    let observed = reconciler.list_tags(&ctx, ARN).await.unwrap();
    reconciler
        .update_tags(&ctx, ARN, &observed, &desired)
        .await
        .unwrap();

    assert_eq!(healthy.remote(), map(&[("b", "2")]));
}

#[tokio::test]
async fn test_list_tags_returns_remote_tags() {
    let fake = FakeTagging::with_remote(&[("env", "prod"), ("aws:cloudformation:stack-id", "s")]);
    let ctx = CallContext::background();

    let listed = reconciler(&fake).list_tags(&ctx, ARN).await.unwrap();

    assert_eq!(
        listed,
        tags(&[("env", "prod"), ("aws:cloudformation:stack-id", "s")])
    );
    assert_eq!(fake.calls(), vec![TagCall::List(ARN.to_string())]);
}

#[tokio::test]
async fn test_list_tags_error_passes_through() {
    let cause = TransportError::with_code("ResourceNotFoundException", "no such secret");
    let fake = FakeTagging {
        fail_list: Some(cause.clone()),
        ..FakeTagging::default()
    };
    let ctx = CallContext::background();

    let err = reconciler(&fake).list_tags(&ctx, ARN).await.unwrap_err();

    assert!(matches!(err, Error::Transport(_)));
    assert_eq!(err.to_string(), cause.to_string());
}

#[tokio::test(start_paused = true)]
async fn test_call_context_reaches_every_call() {
    let fake = FakeTagging::with_remote(&[("a", "1")]);
    let ctx = CallContext::with_timeout(Duration::from_secs(30));
    let reconciler = reconciler(&fake);

    let observed = reconciler.list_tags(&ctx, ARN).await.unwrap();
    reconciler
        .update_tags(&ctx, ARN, &observed, &tags(&[("b", "2")]))
        .await
        .unwrap();

    assert_eq!(fake.calls().len(), 3);
    assert_eq!(fake.contexts(), vec![ctx; 3]);
    assert_eq!(fake.contexts()[0].deadline(), ctx.deadline());
}

#[tokio::test(start_paused = true)]
async fn test_deadline_error_from_untag_stops_tag() {
    let fake = FakeTagging {
        fail_untag: Some(TransportError::deadline_exceeded()),
        ..FakeTagging::default()
    };
    let ctx = CallContext::with_timeout(Duration::from_secs(1));

    let err = reconciler(&fake)
        .update_tags(&ctx, ARN, &tags(&[("a", "1")]), &tags(&[("b", "2")]))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Untag { .. }));
    assert!(err.transport().is_some_and(TransportError::is_deadline_exceeded));
    assert_eq!(fake.contexts(), vec![ctx]);
}

#[test]
fn test_plan_matches_update() {
    let fake = FakeTagging::default();
    let plan = reconciler(&fake).plan(
        &tags(&[("a", "1"), ("b", "2"), ("aws:x", "1")]),
        &tags(&[("b", "3"), ("c", "4")]),
    );

    assert_eq!(plan.removed, vec!["a".to_string()]);
    assert_eq!(plan.updated, tags(&[("b", "3"), ("c", "4")]));
}
