// SPDX-FileCopyrightText: 2026 Redline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire types for the design-review REST API and their conversion into the
//! domain model.
//!
//! Wire types are permissive (every field optional where the API may omit
//! it); validation happens once at the boundary in the `into_*` functions so
//! nothing undefined reaches the frame resolver.

use chrono::{DateTime, Utc};
use redline_core::{Anchor, BoundingBox, Comment, DocumentNode, NodeKind, Point, RedlineError};
use serde::Deserialize;

/// Author shown when the API omits the user object.
pub const UNKNOWN_AUTHOR: &str = "unknown";

// --- Comments ---

/// `GET /v1/files/{key}/comments` response body.
#[derive(Debug, Deserialize)]
pub struct CommentsResponse {
    #[serde(default)]
    pub comments: Vec<WireComment>,
}

#[derive(Debug, Deserialize)]
pub struct WireComment {
    pub id: String,
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub user: Option<WireUser>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub resolved_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub client_meta: Option<WireClientMeta>,
}

#[derive(Debug, Deserialize)]
pub struct WireUser {
    #[serde(default)]
    pub handle: String,
}

/// Where a comment was placed: an absolute canvas point, a node with an
/// offset inside it, or both.
#[derive(Debug, Default, Deserialize)]
pub struct WireClientMeta {
    #[serde(default)]
    pub node_id: Option<String>,
    #[serde(default)]
    pub x: Option<f64>,
    #[serde(default)]
    pub y: Option<f64>,
    #[serde(default)]
    pub node_offset: Option<WireOffset>,
}

#[derive(Debug, Deserialize)]
pub struct WireOffset {
    pub x: f64,
    pub y: f64,
}

impl From<WireComment> for Comment {
    fn from(wire: WireComment) -> Self {
        Comment {
            id: wire.id,
            parent_id: wire.parent_id.filter(|p| !p.is_empty()),
            author: wire
                .user
                .map(|u| u.handle)
                .filter(|h| !h.is_empty())
                .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string()),
            created_at: wire.created_at,
            resolved_at: wire.resolved_at,
            message: wire.message,
            anchor: wire.client_meta.and_then(into_anchor),
        }
    }
}

fn into_anchor(meta: WireClientMeta) -> Option<Anchor> {
    let point = match (meta.x, meta.y) {
        (Some(x), Some(y)) => Some(Point::new(x, y)),
        _ => meta.node_offset.map(|o| Point::new(o.x, o.y)),
    };
    let node_id = meta.node_id.filter(|id| !id.is_empty());
    if node_id.is_none() && point.is_none() {
        return None;
    }
    Some(Anchor { node_id, point })
}

/// Decodes a comments response body.
pub fn decode_comments(body: &str) -> Result<Vec<Comment>, RedlineError> {
    let response: CommentsResponse = serde_json::from_str(body)
        .map_err(|e| RedlineError::transport(format!("failed to parse comments response: {e}"), e))?;
    Ok(response.comments.into_iter().map(Comment::from).collect())
}

// --- Structure ---

/// JSON nesting accepted beyond a node's own object and `children` array,
/// for nested node properties such as fills and their colors.
const PROPERTY_NESTING_ALLOWANCE: usize = 16;

/// `GET /v1/files/{key}` response body. Only the document tree is used.
#[derive(Debug, Deserialize)]
pub struct FileResponse {
    #[serde(default)]
    pub document: Option<WireNode>,
}

#[derive(Debug, Deserialize)]
pub struct WireNode {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type", default)]
    pub node_type: Option<String>,
    #[serde(default)]
    pub children: Vec<WireNode>,
    #[serde(rename = "absoluteBoundingBox", default)]
    pub absolute_bounding_box: Option<WireBox>,
}

#[derive(Debug, Deserialize)]
pub struct WireBox {
    #[serde(default)]
    pub x: Option<f64>,
    #[serde(default)]
    pub y: Option<f64>,
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub height: Option<f64>,
}

impl WireBox {
    /// All four fields present and finite, otherwise no box at all.
    fn into_bounds(self) -> Option<BoundingBox> {
        let (x, y, width, height) = (self.x?, self.y?, self.width?, self.height?);
        [x, y, width, height]
            .iter()
            .all(|v| v.is_finite())
            .then(|| BoundingBox::new(x, y, width, height))
    }
}

/// Decodes a file response body into its document root.
///
/// Nesting is bounded by `max_depth` before parsing, so the parser itself
/// runs without serde_json's fixed recursion limit.
pub fn decode_structure(body: &str, max_depth: usize) -> Result<DocumentNode, RedlineError> {
    // Each node level is an object plus its `children` array.
    let nesting_limit = max_depth
        .saturating_mul(2)
        .saturating_add(PROPERTY_NESTING_ALLOWANCE);
    if json_nesting(body) > nesting_limit {
        return Err(RedlineError::MalformedStructure(format!(
            "structure nested deeper than {max_depth} levels"
        )));
    }

    let response = parse_file_response(body).map_err(|e| {
        RedlineError::MalformedStructure(format!("failed to parse file response: {e}"))
    })?;
    let document = response.document.ok_or_else(|| {
        RedlineError::MalformedStructure("file response has no document".to_string())
    })?;

    let mut path = Vec::new();
    into_node(document, &mut path, max_depth)
}

fn parse_file_response(body: &str) -> Result<FileResponse, serde_json::Error> {
    let mut json = serde_json::Deserializer::from_str(body);
    json.disable_recursion_limit();
    let response = FileResponse::deserialize(serde_stacker::Deserializer::new(&mut json))?;
    json.end()?;
    Ok(response)
}

/// Deepest `{`/`[` nesting of a JSON text, ignoring brackets inside strings.
fn json_nesting(body: &str) -> usize {
    let (mut depth, mut deepest) = (0usize, 0usize);
    let (mut in_string, mut escaped) = (false, false);
    for byte in body.bytes() {
        if in_string {
            match byte {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match byte {
            b'"' => in_string = true,
            b'{' | b'[' => {
                depth += 1;
                deepest = deepest.max(depth);
            }
            b'}' | b']' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    deepest
}

/// Converts a wire node, failing fast on a missing identifier or name.
///
/// `path` holds the names of the ancestors and is used in error messages.
fn into_node(
    wire: WireNode,
    path: &mut Vec<String>,
    max_depth: usize,
) -> Result<DocumentNode, RedlineError> {
    let location = || {
        if path.is_empty() {
            "document root".to_string()
        } else {
            format!("child of {}", path.join(" / "))
        }
    };

    if path.len() >= max_depth {
        return Err(RedlineError::MalformedStructure(format!(
            "structure nested deeper than {max_depth} levels at {}",
            location()
        )));
    }

    let id = wire
        .id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| RedlineError::MalformedStructure(format!("node without id ({})", location())))?;
    let name = wire.name.ok_or_else(|| {
        RedlineError::MalformedStructure(format!("node {id} without name ({})", location()))
    })?;
    let kind = NodeKind::from_api_type(wire.node_type.as_deref().unwrap_or_default());

    path.push(name.clone());
    let children = wire
        .children
        .into_iter()
        .map(|child| into_node(child, path, max_depth))
        .collect::<Result<Vec<_>, _>>();
    path.pop();

    let mut node = DocumentNode::new(id, name, kind).with_children(children?);
    if let Some(bounds) = wire.absolute_bounding_box.and_then(WireBox::into_bounds) {
        node = node.with_bounds(bounds);
    }
    Ok(node)
}
