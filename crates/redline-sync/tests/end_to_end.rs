// SPDX-FileCopyrightText: 2026 Redline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Full pipeline: REST providers against a mock server, Markdown documents
//! on a temporary directory.

use std::sync::Arc;

use redline_config::model::{RedlineConfig, SourceFileConfig};
use redline_core::{Clock, SystemClock};
use redline_frames::FrameResolver;
use redline_remote::FigmaRemote;
use redline_store::MarkdownStore;
use redline_sync::{FileOutcome, SyncMode, SyncOrchestrator, SyncSettings};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn comments_body() -> serde_json::Value {
    json!({
        "comments": [
            {
                "id": "c1",
                "parent_id": "",
                "user": { "handle": "ana" },
                "created_at": "2026-03-01T09:00:00Z",
                "resolved_at": null,
                "message": "Button label is truncated",
                "client_meta": { "node_id": "1:3", "node_offset": { "x": 4, "y": 4 } }
            },
            {
                "id": "c2",
                "parent_id": "c1",
                "user": { "handle": "ben" },
                "created_at": "2026-03-02T09:00:00Z",
                "resolved_at": "2026-03-03T09:00:00Z",
                "message": "Fixed\nwith a shorter label",
                "client_meta": null
            },
            {
                "id": "c3",
                "parent_id": "",
                "user": { "handle": "cy" },
                "created_at": "2026-03-02T12:00:00Z",
                "resolved_at": null,
                "message": "Needs a darker background",
                "client_meta": { "node_id": "0:1", "node_offset": { "x": 50, "y": 500 } }
            }
        ]
    })
}

fn structure_body() -> serde_json::Value {
    json!({
        "name": "Web App",
        "document": {
            "id": "0:0", "name": "Document", "type": "DOCUMENT",
            "children": [{
                "id": "0:1", "name": "Home", "type": "CANVAS",
                "children": [{
                    "id": "1:1", "name": "Landing", "type": "FRAME",
                    "absoluteBoundingBox": { "x": 0, "y": 0, "width": 1440, "height": 900 },
                    "children": [{
                        "id": "1:2", "name": "Header", "type": "FRAME",
                        "absoluteBoundingBox": { "x": 0, "y": 0, "width": 1440, "height": 120 },
                        "children": [{
                            "id": "1:3", "name": "Sign up", "type": "INSTANCE",
                            "absoluteBoundingBox": { "x": 1200, "y": 40, "width": 160, "height": 40 }
                        }]
                    }]
                }]
            }]
        }
    })
}

async fn mount(server: &MockServer, file_key: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/v1/files/{file_key}/comments")))
        .respond_with(ResponseTemplate::new(200).set_body_json(comments_body()))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/v1/files/{file_key}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(structure_body()))
        .expect(1)
        .mount(server)
        .await;
}

fn orchestrator(config: &RedlineConfig) -> SyncOrchestrator {
    let remote = Arc::new(FigmaRemote::new(config).unwrap());
    let store = Arc::new(MarkdownStore::new(&config.sync.documents_root));
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let resolver = FrameResolver::new(remote.clone(), &config.frames, clock.clone());
    SyncOrchestrator::new(
        remote,
        store,
        resolver,
        clock,
        SyncSettings::from(&config.sync),
    )
}

#[tokio::test]
async fn syncs_comments_into_markdown_on_disk() {
    let server = MockServer::start().await;
    mount(&server, "ABC123XYZ").await;
    let dir = tempfile::tempdir().unwrap();

    let mut config = RedlineConfig::default();
    config.remote.base_url = server.uri();
    config.remote.access_token = Some("figd_e2e".into());
    config.sync.documents_root = dir.path().to_string_lossy().to_string();
    config.files = vec![SourceFileConfig::new("web", "Web App", "ABC123XYZ")];

    let mut orchestrator = orchestrator(&config);
    let report = orchestrator
        .run_pass(&mut config.files, SyncMode::Scheduled)
        .await
        .unwrap();
    assert!(matches!(
        report.files[0].outcome,
        FileOutcome::Synced { total: 3, open: 2, resolved: 1, .. }
    ));

    let written = dir.path().join("Design Comments/Web App.md");
    let doc = std::fs::read_to_string(&written).unwrap();
    assert!(doc.contains("# Web App"));
    assert!(doc.contains("Frame: Landing > Header > Sign up (Home)"));
    assert!(doc.contains("Frame: Landing (Home)"));
    assert!(doc.contains("- [x] **2026-03-02 09:00 UTC** (reply) Fixed\n    with a shorter label\n"));

    // A rename by the user is followed on the next pass.
    let renamed = dir.path().join("Design Comments/Web review.md");
    std::fs::rename(&written, &renamed).unwrap();
    orchestrator
        .run_pass(&mut config.files, SyncMode::Scheduled)
        .await
        .unwrap();

    assert!(renamed.is_file());
    assert!(!written.exists());
    assert_eq!(
        std::fs::read_dir(dir.path().join("Design Comments")).unwrap().count(),
        1
    );
}
