// SPDX-FileCopyrightText: 2026 Redline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Provider traits for the design-review API.

use async_trait::async_trait;

use crate::error::RedlineError;
use crate::types::{Comment, DocumentNode};

/// Lists the comments of a source file.
#[async_trait]
pub trait CommentProvider: Send + Sync {
    /// Fetches every comment on `file_key`.
    ///
    /// Non-success responses are returned as `Transport` or `Auth` errors.
    async fn list_comments(&self, file_key: &str) -> Result<Vec<Comment>, RedlineError>;
}

/// Fetches the visual structure tree of a source file.
#[async_trait]
pub trait StructureProvider: Send + Sync {
    /// Fetches the whole structure tree (with geometry), rooted at the
    /// document node.
    async fn get_structure(&self, file_key: &str) -> Result<DocumentNode, RedlineError>;
}
