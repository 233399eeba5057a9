// SPDX-FileCopyrightText: 2026 Redline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Document store trait for the rendered comment documents.

use async_trait::async_trait;

use crate::error::RedlineError;
use crate::types::StoredDocument;

/// A hierarchical store of text documents.
///
/// Folder paths are relative to the store root and use `/` separators.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Creates `folder` (and its parents). A no-op if it already exists.
    async fn ensure_folder(&self, folder: &str) -> Result<(), RedlineError>;

    /// Finds the document whose metadata records `file_key`, wherever it lives.
    async fn find_by_key(&self, file_key: &str) -> Result<Option<StoredDocument>, RedlineError>;

    /// Creates a new document named after `stem` inside `folder`.
    ///
    /// The stem is sanitized and de-duplicated against existing documents.
    async fn create(
        &self,
        folder: &str,
        stem: &str,
        content: &str,
    ) -> Result<StoredDocument, RedlineError>;

    /// Replaces the content of an existing document in place.
    async fn overwrite(&self, doc: &StoredDocument, content: &str) -> Result<(), RedlineError>;

    /// Moves a document into `folder`, keeping its file name when possible.
    async fn move_to(
        &self,
        doc: &StoredDocument,
        folder: &str,
    ) -> Result<StoredDocument, RedlineError>;
}
