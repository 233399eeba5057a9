// SPDX-FileCopyrightText: 2026 Redline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for frame resolution against a mock structure provider.

use std::sync::Arc;

use chrono::TimeDelta;
use redline_config::model::FramesConfig;
use redline_core::{BoundingBox, DocumentNode, NodeKind, Point};
use redline_frames::FrameResolver;
use redline_frames::resolver::{ROOT_CONTAINER_NAME, UNKNOWN_PAGE_NAME};
use redline_test_utils::{fixtures, ManualClock, MockFailure, MockRemote};
use tracing_test::traced_test;

const FILE: &str = "ABC123XYZ";

async fn setup(root: DocumentNode) -> (FrameResolver, Arc<MockRemote>, Arc<ManualClock>) {
    let remote = Arc::new(MockRemote::new());
    remote.set_structure(FILE, root).await;
    let clock = Arc::new(ManualClock::default());
    let resolver = FrameResolver::new(remote.clone(), &FramesConfig::default(), clock.clone());
    (resolver, remote, clock)
}

fn two_boxes(first: BoundingBox, second: BoundingBox) -> DocumentNode {
    DocumentNode::new("0:0", "Document", NodeKind::Other("DOCUMENT".into())).with_children(vec![
        DocumentNode::new("0:1", "Page 1", NodeKind::Page).with_children(vec![
            DocumentNode::new("5:1", "Large", NodeKind::Frame).with_bounds(first),
            DocumentNode::new("5:2", "Small", NodeKind::Frame).with_bounds(second),
        ]),
    ])
}

#[tokio::test]
async fn placeholder_without_point_resolves_to_none_without_fetching() {
    let (mut resolver, remote, _) = setup(fixtures::sample_structure()).await;

    assert!(resolver.resolve(FILE, Some("0:1"), None).await.is_none());
    assert!(resolver.resolve(FILE, None, None).await.is_none());
    assert_eq!(remote.structure_fetches(FILE).await, 0);
}

#[tokio::test]
async fn real_node_id_resolves_to_nearest_container() {
    let (mut resolver, _, _) = setup(fixtures::sample_structure()).await;

    let info = resolver.resolve(FILE, Some("1:4"), None).await.unwrap();
    assert_eq!(info.node_id, "1:4");
    assert_eq!(info.name, "CTA Button");
    assert_eq!(info.page_name, "Home");
    assert_eq!(info.full_path, "Landing > Hero > CTA Button");
    assert!(info.full_path.ends_with(&info.name));
}

#[tokio::test]
async fn node_in_a_group_resolves_to_enclosing_frame() {
    let (mut resolver, _, _) = setup(fixtures::sample_structure()).await;

    let info = resolver.resolve(FILE, Some("1:6"), None).await.unwrap();
    assert_eq!(info.name, "Landing");
    assert_eq!(info.full_path, "Landing");
}

#[tokio::test]
async fn node_without_container_resolves_to_root() {
    let (mut resolver, _, _) = setup(fixtures::sample_structure()).await;

    let info = resolver.resolve(FILE, Some("1:7"), None).await.unwrap();
    assert_eq!(info.name, ROOT_CONTAINER_NAME);
    assert_eq!(info.page_name, "Home");
}

#[tokio::test]
async fn unknown_node_id_resolves_to_none() {
    let (mut resolver, remote, _) = setup(fixtures::sample_structure()).await;

    assert!(resolver.resolve(FILE, Some("99:99"), None).await.is_none());
    assert_eq!(remote.structure_fetches(FILE).await, 1);
}

#[tokio::test]
async fn repeated_resolution_fetches_structure_once() {
    let (mut resolver, remote, _) = setup(fixtures::sample_structure()).await;

    let first = resolver.resolve(FILE, Some("1:3"), None).await;
    let second = resolver.resolve(FILE, Some("1:3"), None).await;
    let other = resolver.resolve(FILE, Some("2:1"), None).await;

    assert_eq!(first, second);
    assert_eq!(other.unwrap().page_name, "Library");
    assert_eq!(remote.structure_fetches(FILE).await, 1);
}

#[tokio::test]
async fn expired_cache_triggers_exactly_one_refetch() {
    let (mut resolver, remote, clock) = setup(fixtures::sample_structure()).await;

    resolver.resolve(FILE, Some("1:3"), None).await.unwrap();
    clock.advance(TimeDelta::hours(23));
    resolver.resolve(FILE, Some("1:3"), None).await.unwrap();
    assert_eq!(remote.structure_fetches(FILE).await, 1);

    clock.advance(TimeDelta::hours(1));
    resolver.resolve(FILE, Some("1:3"), None).await.unwrap();
    resolver.resolve(FILE, Some("1:2"), None).await.unwrap();
    assert_eq!(remote.structure_fetches(FILE).await, 2);
}

#[tokio::test]
async fn clear_cache_forces_one_refetch() {
    let (mut resolver, remote, _) = setup(fixtures::sample_structure()).await;

    resolver.resolve(FILE, Some("1:3"), None).await.unwrap();
    resolver.clear_cache();
    resolver.resolve(FILE, Some("1:3"), None).await.unwrap();
    resolver.resolve(FILE, Some("1:3"), None).await.unwrap();
    assert_eq!(remote.structure_fetches(FILE).await, 2);
}

#[tokio::test]
async fn coordinate_resolution_via_placeholder() {
    let (mut resolver, _, _) = setup(fixtures::sample_structure()).await;

    let info = resolver
        .resolve(FILE, Some("0:1"), Some(Point::new(150.0, 320.0)))
        .await
        .unwrap();
    assert_eq!(info.name, "CTA Button");
    assert_eq!(info.node_id, "@150,320");

    let info = resolver
        .resolve(FILE, Some("0:1"), Some(Point::new(700.0, 600.0)))
        .await
        .unwrap();
    assert_eq!(info.name, "Landing");
}

#[tokio::test]
async fn point_outside_every_container_resolves_to_none() {
    let (mut resolver, _, _) = setup(fixtures::sample_structure()).await;

    let info = resolver
        .resolve(FILE, None, Some(Point::new(5000.0, 5000.0)))
        .await;
    assert!(info.is_none());
}

#[tokio::test]
async fn smaller_container_wins_the_coordinate_match() {
    let root = two_boxes(
        BoundingBox::new(0.0, 0.0, 10.0, 10.0),
        BoundingBox::new(0.0, 0.0, 10.0, 5.0),
    );
    let (mut resolver, _, _) = setup(root).await;

    let info = resolver
        .resolve(FILE, Some("0:1"), Some(Point::new(5.0, 5.0)))
        .await
        .unwrap();
    assert_eq!(info.name, "Small");
    assert_eq!(info.page_name, "Page 1");
}

#[tokio::test]
async fn points_on_the_boundary_are_inside() {
    let root = two_boxes(
        BoundingBox::new(0.0, 0.0, 10.0, 10.0),
        BoundingBox::new(20.0, 20.0, 5.0, 5.0),
    );
    let (mut resolver, _, _) = setup(root).await;

    for (x, y) in [(0.0, 0.0), (10.0, 10.0), (10.0, 0.0)] {
        let info = resolver.resolve(FILE, None, Some(Point::new(x, y))).await;
        assert_eq!(info.unwrap().name, "Large", "point ({x}, {y})");
    }
    assert!(
        resolver
            .resolve(FILE, None, Some(Point::new(10.5, 10.0)))
            .await
            .is_none()
    );
}

#[tokio::test]
async fn structure_without_pages_uses_unknown_page_name() {
    let root = DocumentNode::new("0:0", "Document", NodeKind::Other("DOCUMENT".into()))
        .with_children(vec![DocumentNode::new("3:1", "Orphan", NodeKind::Frame)]);
    let (mut resolver, _, _) = setup(root).await;

    let info = resolver.resolve(FILE, Some("3:1"), None).await.unwrap();
    assert_eq!(info.page_name, UNKNOWN_PAGE_NAME);
    assert_eq!(info.name, "Orphan");
}

#[tokio::test]
#[traced_test]
async fn fetch_failure_is_logged_and_absorbed() {
    let (mut resolver, remote, _) = setup(fixtures::sample_structure()).await;
    remote.fail_structure(FILE, MockFailure::Status(503)).await;

    assert!(resolver.resolve(FILE, Some("1:3"), None).await.is_none());
    assert!(logs_contain("frame resolution failed"));
}

#[tokio::test]
#[traced_test]
async fn auth_and_malformed_failures_are_absorbed() {
    let (mut resolver, remote, _) = setup(fixtures::sample_structure()).await;

    remote.fail_structure(FILE, MockFailure::Auth).await;
    assert!(resolver.resolve(FILE, Some("1:3"), None).await.is_none());
    assert!(logs_contain("auth=true"));

    remote.fail_structure(FILE, MockFailure::Malformed).await;
    assert!(resolver.resolve(FILE, Some("1:3"), None).await.is_none());
    assert!(logs_contain("malformed structure"));
}

#[tokio::test]
async fn failures_are_not_cached() {
    let (mut resolver, remote, _) = setup(fixtures::sample_structure()).await;
    remote.fail_structure(FILE, MockFailure::Status(500)).await;
    assert!(resolver.resolve(FILE, Some("1:3"), None).await.is_none());

    remote.set_structure(FILE, fixtures::sample_structure()).await;
    let info = resolver.resolve(FILE, Some("1:3"), None).await.unwrap();
    assert_eq!(info.name, "CTA Button");
    assert_eq!(remote.structure_fetches(FILE).await, 2);
}

#[tokio::test]
async fn files_are_cached_independently() {
    let (mut resolver, remote, _) = setup(fixtures::sample_structure()).await;
    remote.set_structure("OTHER", fixtures::sample_structure()).await;

    resolver.resolve(FILE, Some("1:3"), None).await.unwrap();
    resolver.resolve("OTHER", Some("1:3"), None).await.unwrap();
    resolver.resolve(FILE, Some("1:2"), None).await.unwrap();

    assert_eq!(remote.structure_fetches(FILE).await, 1);
    assert_eq!(remote.structure_fetches("OTHER").await, 1);
    assert_eq!(resolver.cache_len(), 2);
}

#[tokio::test]
async fn huge_cache_ttl_keeps_entries_instead_of_panicking() {
    let remote = Arc::new(MockRemote::new());
    remote.set_structure(FILE, fixtures::sample_structure()).await;
    let clock = Arc::new(ManualClock::default());
    let config = FramesConfig {
        cache_ttl_hours: 10_000_000_000_000,
        ..FramesConfig::default()
    };
    let mut resolver = FrameResolver::new(remote.clone(), &config, clock.clone());

    resolver.resolve(FILE, Some("1:3"), None).await.unwrap();
    clock.advance(TimeDelta::days(365 * 100));
    resolver.resolve(FILE, Some("1:2"), None).await.unwrap();

    assert_eq!(remote.structure_fetches(FILE).await, 1);
}
