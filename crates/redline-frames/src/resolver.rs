// SPDX-FileCopyrightText: 2026 Redline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Resolves a comment anchor to the named container it was placed on.
//!
//! Two strategies, tried in order:
//! - **by identifier**: the anchor names a real node; the nearest container
//!   among the node and its ancestors wins.
//! - **by coordinate**: the anchor only carries a canvas point; the
//!   smallest-area container whose bounds enclose the point wins, earliest
//!   in pre-order on ties.
//!
//! Fetch failures and malformed structures never escape [`FrameResolver::resolve`]:
//! they are logged and turned into an absent result so a sync pass can carry on
//! without frame annotations.

use std::ops::ControlFlow;
use std::sync::Arc;

use chrono::TimeDelta;
use redline_config::model::FramesConfig;
use redline_core::{Clock, DocumentNode, FrameInfo, Point, RedlineError, StructureProvider};
use tracing::{debug, warn};

use crate::cache::StructureCache;
use crate::geometry;
use crate::walker;

/// Container name used when a match has no container ancestor.
pub const ROOT_CONTAINER_NAME: &str = "Root";

/// Page name used when a match has no page ancestor.
pub const UNKNOWN_PAGE_NAME: &str = "Unknown page";

/// Separator between container names in [`FrameInfo::full_path`].
pub const PATH_SEPARATOR: &str = " > ";

/// Resolves anchors against cached structure trees, fetching a file's tree
/// from the structure provider on a cache miss.
pub struct FrameResolver {
    provider: Arc<dyn StructureProvider>,
    cache: StructureCache,
    placeholder_node_id: String,
    max_depth: usize,
}

/// How an anchor is looked up.
enum Strategy {
    ById(String),
    ByPoint(Point),
}

impl FrameResolver {
    pub fn new(
        provider: Arc<dyn StructureProvider>,
        config: &FramesConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let validity = i64::try_from(config.cache_ttl_hours)
            .ok()
            .and_then(TimeDelta::try_hours)
            .unwrap_or(TimeDelta::MAX);
        Self {
            provider,
            cache: StructureCache::new(validity, clock),
            placeholder_node_id: config.placeholder_node_id.clone(),
            max_depth: config.max_depth,
        }
    }

    /// Drops every cached structure and resolution.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Number of files with a cached entry, expired ones included.
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    /// Resolve an anchor on `file_key` to its container.
    ///
    /// Returns `None` when there is nothing to resolve, when no node matches,
    /// or when the structure could not be fetched or parsed (logged).
    pub async fn resolve(
        &mut self,
        file_key: &str,
        anchor_node_id: Option<&str>,
        point: Option<Point>,
    ) -> Option<FrameInfo> {
        let strategy = match (anchor_node_id, point) {
            (Some(id), _) if !id.is_empty() && id != self.placeholder_node_id => {
                Strategy::ById(id.to_string())
            }
            (_, Some(point)) => Strategy::ByPoint(point),
            _ => return None,
        };

        match self.try_resolve(file_key, strategy).await {
            Ok(found) => found,
            Err(e) => {
                warn!(
                    file_key,
                    error = %e,
                    auth = e.is_auth(),
                    "frame resolution failed, continuing without frame info"
                );
                None
            }
        }
    }

    async fn try_resolve(
        &mut self,
        file_key: &str,
        strategy: Strategy,
    ) -> Result<Option<FrameInfo>, RedlineError> {
        let key = match &strategy {
            Strategy::ById(id) => id.clone(),
            Strategy::ByPoint(point) => point_key(*point),
        };

        if let Some(hit) = self.cache.get_resolved(file_key, &key) {
            debug!(file_key, key = %key, "frame cache hit");
            return Ok(Some(hit));
        }

        let root = self.structure(file_key).await?;
        let path = match &strategy {
            Strategy::ById(id) => walker::find_path(&root, id, self.max_depth)?,
            Strategy::ByPoint(point) => smallest_enclosing(&root, *point, self.max_depth)?,
        };

        let Some(path) = path else {
            debug!(file_key, key = %key, "no node matched anchor");
            return Ok(None);
        };

        let info = frame_info(&key, &path);
        self.cache.put_resolved(file_key, &key, info.clone());
        Ok(Some(info))
    }

    /// Cached structure for `file_key`, fetched and cached on a miss.
    async fn structure(&mut self, file_key: &str) -> Result<Arc<DocumentNode>, RedlineError> {
        if let Some(root) = self.cache.get(file_key).and_then(|e| e.structure()) {
            return Ok(root);
        }

        debug!(file_key, "fetching structure");
        let root = Arc::new(self.provider.get_structure(file_key).await?);
        self.cache.put(file_key, root.clone());
        Ok(root)
    }
}

/// Cache key for a coordinate anchor. The `@` prefix keeps it apart from
/// node identifiers.
pub fn point_key(point: Point) -> String {
    format!("@{},{}", point.x, point.y)
}

/// Ancestor path of the smallest-area container enclosing `point`.
fn smallest_enclosing<'a>(
    root: &'a DocumentNode,
    point: Point,
    max_depth: usize,
) -> Result<Option<Vec<&'a DocumentNode>>, RedlineError> {
    let mut best: Option<(f64, Vec<&'a DocumentNode>)> = None;

    walker::traverse(root, max_depth, |node, path| {
        let Some(bounds) = node.bounds.as_ref() else {
            return ControlFlow::Continue(());
        };
        if !node.kind.is_container()
            || !geometry::is_matchable(bounds)
            || !geometry::contains(bounds, point)
        {
            return ControlFlow::Continue(());
        }

        let area = geometry::area(bounds);
        // Strictly smaller only: the first candidate seen keeps a tie.
        if best.as_ref().is_none_or(|(best_area, _)| area < *best_area) {
            best = Some((area, path.to_vec()));
        }
        ControlFlow::Continue(())
    })?;

    Ok(best.map(|(_, path)| path))
}

/// Build the frame info for a match given its ancestor path (root first).
fn frame_info(key: &str, path: &[&DocumentNode]) -> FrameInfo {
    let page_index = path.iter().rposition(|n| n.kind.is_page());
    let page_name = page_index
        .map(|i| path[i].name.clone())
        .unwrap_or_else(|| UNKNOWN_PAGE_NAME.to_string());

    let below_page = match page_index {
        Some(i) => &path[i + 1..],
        None => path,
    };
    // Nearest container walking up from the match is the last one in the path.
    let containers: Vec<&str> = below_page
        .iter()
        .filter(|n| n.kind.is_container())
        .map(|n| n.name.as_str())
        .collect();

    let name = containers
        .last()
        .copied()
        .unwrap_or(ROOT_CONTAINER_NAME)
        .to_string();
    let full_path = if containers.is_empty() {
        name.clone()
    } else {
        containers.join(PATH_SEPARATOR)
    };

    FrameInfo {
        node_id: key.to_string(),
        name,
        page_name,
        full_path,
    }
}
