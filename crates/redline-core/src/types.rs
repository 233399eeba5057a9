// SPDX-FileCopyrightText: 2026 Redline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Data model shared across the workspace: comments, the document structure
//! tree, resolved frame info, and stored document handles.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};

/// A point on the design canvas, in absolute pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Absolute bounding box of a node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Where a comment was placed: an optional node identifier and an optional
/// raw pixel position.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Anchor {
    pub node_id: Option<String>,
    pub point: Option<Point>,
}

/// One discussion entry on a source file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    /// Parent comment within the same file, for threaded replies.
    pub parent_id: Option<String>,
    pub author: String,
    pub created_at: DateTime<Utc>,
    /// `None` while the comment is open.
    pub resolved_at: Option<DateTime<Utc>>,
    pub message: String,
    pub anchor: Option<Anchor>,
}

impl Comment {
    pub fn is_resolved(&self) -> bool {
        self.resolved_at.is_some()
    }

    pub fn is_reply(&self) -> bool {
        self.parent_id.is_some()
    }
}

/// Node kinds recognized by the frame resolver.
///
/// Anything the resolver does not care about lands in `Other`, keeping the
/// raw type name for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Display, AsRefStr, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
pub enum NodeKind {
    Page,
    Frame,
    Component,
    Instance,
    Other(String),
}

impl NodeKind {
    /// Maps a node type string from the design API.
    pub fn from_api_type(raw: &str) -> Self {
        match raw {
            "CANVAS" => NodeKind::Page,
            "FRAME" => NodeKind::Frame,
            "COMPONENT" => NodeKind::Component,
            "INSTANCE" => NodeKind::Instance,
            other => NodeKind::Other(other.to_string()),
        }
    }

    /// Frames, components, and instances are the visually meaningful
    /// groupings a comment can be attributed to.
    pub fn is_container(&self) -> bool {
        matches!(
            self,
            NodeKind::Frame | NodeKind::Component | NodeKind::Instance
        )
    }

    pub fn is_page(&self) -> bool {
        matches!(self, NodeKind::Page)
    }
}

/// One element of a source file's visual structure tree.
///
/// Children are owned exclusively by their parent, so a tree built from
/// these values is acyclic by construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentNode {
    pub id: String,
    pub name: String,
    pub kind: NodeKind,
    pub bounds: Option<BoundingBox>,
    pub children: Vec<DocumentNode>,
}

impl DocumentNode {
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            bounds: None,
            children: Vec::new(),
        }
    }

    pub fn with_bounds(mut self, bounds: BoundingBox) -> Self {
        self.bounds = Some(bounds);
        self
    }

    pub fn with_children(mut self, children: Vec<DocumentNode>) -> Self {
        self.children = children;
        self
    }
}

/// The container a comment was resolved to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameInfo {
    /// Matched node identifier, or the coordinate-derived key.
    pub node_id: String,
    /// Display name of the nearest container (or `"Root"`).
    pub name: String,
    pub page_name: String,
    /// Container names from below the page down to the match, joined by `" > "`.
    pub full_path: String,
}

/// Handle to a rendered document inside the document store.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    /// Path relative to the store root.
    pub path: PathBuf,
    /// Remote file key recorded in the document's metadata header.
    pub file_key: Option<String>,
    /// Creation timestamp recorded in the metadata header.
    pub created: Option<DateTime<Utc>>,
}
