// SPDX-FileCopyrightText: 2026 Redline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests of the REST providers against a mock HTTP server.

use redline_config::model::RedlineConfig;
use redline_core::{CommentProvider, NodeKind, RedlineError, StructureProvider};
use redline_remote::FigmaRemote;
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn remote_for(server: &MockServer) -> FigmaRemote {
    let mut config = RedlineConfig::default();
    config.remote.base_url = server.uri();
    config.remote.access_token = Some("figd_integration".into());
    config.remote.timeout_secs = 5;
    FigmaRemote::new(&config).expect("remote should build")
}

#[tokio::test]
async fn lists_comments_with_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/files/ABC123XYZ/comments"))
        .and(header("X-Figma-Token", "figd_integration"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "comments": [{
                "id": "c1",
                "parent_id": "",
                "user": { "handle": "ana" },
                "created_at": "2026-03-01T09:00:00Z",
                "resolved_at": null,
                "message": "Tighten the hero copy",
                "client_meta": { "node_id": "1:3", "node_offset": { "x": 2, "y": 3 } }
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let comments = remote_for(&server).list_comments("ABC123XYZ").await.unwrap();
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].author, "ana");
    assert_eq!(
        comments[0].anchor.as_ref().and_then(|a| a.node_id.as_deref()),
        Some("1:3")
    );
}

#[tokio::test]
async fn fetches_structure_with_geometry() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/files/ABC123XYZ"))
        .and(query_param("geometry", "paths"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "Web App",
            "document": {
                "id": "0:0", "name": "Document", "type": "DOCUMENT",
                "children": [{
                    "id": "0:1", "name": "Home", "type": "CANVAS",
                    "children": [{
                        "id": "1:1", "name": "Landing", "type": "FRAME",
                        "absoluteBoundingBox": { "x": 0, "y": 0, "width": 1440, "height": 900 }
                    }]
                }]
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let root = remote_for(&server).get_structure("ABC123XYZ").await.unwrap();
    assert_eq!(root.children[0].kind, NodeKind::Page);
    assert_eq!(root.children[0].children[0].name, "Landing");
}

#[tokio::test]
async fn rejected_token_is_auth_on_both_endpoints() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "status": 401, "err": "Invalid token"
        })))
        .mount(&server)
        .await;

    let remote = remote_for(&server);
    assert!(remote.list_comments("K").await.unwrap_err().is_auth());
    assert!(remote.get_structure("K").await.unwrap_err().is_auth());
}

#[tokio::test]
async fn rate_limit_then_success_retries_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/files/K/comments"))
        .respond_with(ResponseTemplate::new(429))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/files/K/comments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "comments": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let comments = remote_for(&server).list_comments("K").await.unwrap();
    assert!(comments.is_empty());
}

#[tokio::test]
async fn structure_without_document_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/files/K"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "name": "Empty" })))
        .mount(&server)
        .await;

    let err = remote_for(&server).get_structure("K").await.unwrap_err();
    assert!(matches!(err, RedlineError::MalformedStructure(_)));
    assert!(!err.is_transport());
}

#[tokio::test]
async fn server_error_after_retries_is_transport() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(2)
        .mount(&server)
        .await;

    let err = remote_for(&server).list_comments("K").await.unwrap_err();
    assert!(matches!(err, RedlineError::Transport { status: Some(500), .. }));
}
