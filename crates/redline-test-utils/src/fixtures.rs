// SPDX-FileCopyrightText: 2026 Redline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared test data: a small but realistic structure tree and comment builders.

use chrono::{DateTime, Utc};
use redline_core::{Anchor, BoundingBox, Comment, DocumentNode, NodeKind, Point};

/// Identifier of the document root in [`sample_structure`].
pub const DOCUMENT_ID: &str = "0:0";

/// A two-page file.
///
/// ```text
/// Document (0:0)
/// ├── Home (0:1, page)
/// │   ├── Landing (1:1, frame)            0,0 1440x900
/// │   │   ├── Hero (1:2, frame)           0,0 1440x400
/// │   │   │   └── CTA Button (1:3, inst)  100,300 200x50
/// │   │   │       └── Label (1:4, text)
/// │   │   └── Footer Group (1:5, group)
/// │   │       └── Copyright (1:6, text)
/// │   └── Loose note (1:7, text)          2000,0 100x20
/// └── Library (2:0, page)
///     └── Button (2:1, component)         0,0 200x50
/// ```
pub fn sample_structure() -> DocumentNode {
    let text = |id: &str, name: &str| DocumentNode::new(id, name, NodeKind::Other("TEXT".into()));

    DocumentNode::new(DOCUMENT_ID, "Document", NodeKind::Other("DOCUMENT".into())).with_children(
        vec![
            DocumentNode::new("0:1", "Home", NodeKind::Page).with_children(vec![
                DocumentNode::new("1:1", "Landing", NodeKind::Frame)
                    .with_bounds(BoundingBox::new(0.0, 0.0, 1440.0, 900.0))
                    .with_children(vec![
                        DocumentNode::new("1:2", "Hero", NodeKind::Frame)
                            .with_bounds(BoundingBox::new(0.0, 0.0, 1440.0, 400.0))
                            .with_children(vec![
                                DocumentNode::new("1:3", "CTA Button", NodeKind::Instance)
                                    .with_bounds(BoundingBox::new(100.0, 300.0, 200.0, 50.0))
                                    .with_children(vec![
                                        text("1:4", "Label")
                                            .with_bounds(BoundingBox::new(110.0, 310.0, 50.0, 20.0)),
                                    ]),
                            ]),
                        DocumentNode::new("1:5", "Footer Group", NodeKind::Other("GROUP".into()))
                            .with_children(vec![text("1:6", "Copyright")]),
                    ]),
                text("1:7", "Loose note").with_bounds(BoundingBox::new(2000.0, 0.0, 100.0, 20.0)),
            ]),
            DocumentNode::new("2:0", "Library", NodeKind::Page).with_children(vec![
                DocumentNode::new("2:1", "Button", NodeKind::Component)
                    .with_bounds(BoundingBox::new(0.0, 0.0, 200.0, 50.0)),
            ]),
        ],
    )
}

/// Parse an RFC 3339 timestamp, panicking on bad test input.
pub fn ts(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .expect("valid RFC 3339 timestamp")
        .with_timezone(&Utc)
}

/// An open, unanchored, top-level comment.
pub fn comment(id: &str, author: &str, created_at: &str, message: &str) -> Comment {
    Comment {
        id: id.to_string(),
        parent_id: None,
        author: author.to_string(),
        created_at: ts(created_at),
        resolved_at: None,
        message: message.to_string(),
        anchor: None,
    }
}

/// Mark a comment resolved at `resolved_at`.
pub fn resolved(mut comment: Comment, resolved_at: &str) -> Comment {
    comment.resolved_at = Some(ts(resolved_at));
    comment
}

/// Anchor a comment to a node.
pub fn on_node(mut comment: Comment, node_id: &str) -> Comment {
    comment.anchor = Some(Anchor {
        node_id: Some(node_id.to_string()),
        point: None,
    });
    comment
}

/// Anchor a comment to the placeholder node at a canvas point.
pub fn at_point(mut comment: Comment, placeholder: &str, x: f64, y: f64) -> Comment {
    comment.anchor = Some(Anchor {
        node_id: Some(placeholder.to_string()),
        point: Some(Point::new(x, y)),
    });
    comment
}
