// SPDX-FileCopyrightText: 2026 Redline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Depth-first, pre-order traversal of a document structure tree.
//!
//! The visitor receives each node together with its ancestor path from the
//! tree root, inclusive of the node itself, so consumers can recover the
//! page and container hierarchy of any match.

use std::ops::ControlFlow;

use redline_core::{DocumentNode, RedlineError};

/// Visit every node under `root` (root first, then each child subtree in
/// order), stopping early if the visitor returns `ControlFlow::Break`.
///
/// Nesting deeper than `max_depth` is treated as malformed input and fails
/// instead of recursing further.
pub fn traverse<'a, F>(
    root: &'a DocumentNode,
    max_depth: usize,
    mut visitor: F,
) -> Result<ControlFlow<()>, RedlineError>
where
    F: FnMut(&'a DocumentNode, &[&'a DocumentNode]) -> ControlFlow<()>,
{
    let mut path = Vec::new();
    walk(root, &mut path, max_depth, &mut visitor)
}

fn walk<'a, F>(
    node: &'a DocumentNode,
    path: &mut Vec<&'a DocumentNode>,
    max_depth: usize,
    visitor: &mut F,
) -> Result<ControlFlow<()>, RedlineError>
where
    F: FnMut(&'a DocumentNode, &[&'a DocumentNode]) -> ControlFlow<()>,
{
    if path.len() >= max_depth {
        return Err(RedlineError::MalformedStructure(format!(
            "structure nested deeper than {max_depth} levels at node `{}`",
            node.id
        )));
    }

    path.push(node);
    if visitor(node, path).is_break() {
        return Ok(ControlFlow::Break(()));
    }
    for child in &node.children {
        if walk(child, path, max_depth, visitor)?.is_break() {
            return Ok(ControlFlow::Break(()));
        }
    }
    path.pop();

    Ok(ControlFlow::Continue(()))
}

/// Find the node with identifier `id`, returning its ancestor path
/// (root first, match last).
pub fn find_path<'a>(
    root: &'a DocumentNode,
    id: &str,
    max_depth: usize,
) -> Result<Option<Vec<&'a DocumentNode>>, RedlineError> {
    let mut found = None;
    traverse(root, max_depth, |node, path| {
        if node.id == id {
            found = Some(path.to_vec());
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    })?;
    Ok(found)
}
