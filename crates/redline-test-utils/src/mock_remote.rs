// SPDX-FileCopyrightText: 2026 Redline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock design-review API for deterministic testing.
//!
//! `MockRemote` implements both `CommentProvider` and `StructureProvider`
//! from pre-configured per-file responses and counts every fetch, so tests
//! can assert that the structure cache prevented a refetch.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use redline_core::{Comment, CommentProvider, DocumentNode, RedlineError, StructureProvider};

/// A failure the mock should return instead of data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockFailure {
    /// Non-success HTTP status.
    Status(u16),
    /// Rejected access token.
    Auth,
    /// Structure response without a document root.
    Malformed,
}

impl MockFailure {
    fn to_error(self, file_key: &str) -> RedlineError {
        match self {
            MockFailure::Status(status) => RedlineError::Transport {
                message: format!("mock API returned {status} for {file_key}"),
                status: Some(status),
                source: None,
            },
            MockFailure::Auth => RedlineError::Auth {
                message: format!("mock API rejected token for {file_key}"),
            },
            MockFailure::Malformed => {
                RedlineError::MalformedStructure(format!("missing document for {file_key}"))
            }
        }
    }
}

/// Mock comment and structure provider.
///
/// Files without a configured response answer with a 404 transport error.
#[derive(Default)]
pub struct MockRemote {
    comments: Mutex<HashMap<String, Result<Vec<Comment>, MockFailure>>>,
    structures: Mutex<HashMap<String, Result<DocumentNode, MockFailure>>>,
    comment_fetches: Mutex<HashMap<String, usize>>,
    structure_fetches: Mutex<HashMap<String, usize>>,
}

impl MockRemote {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set_comments(&self, file_key: &str, comments: Vec<Comment>) {
        self.comments
            .lock()
            .await
            .insert(file_key.to_string(), Ok(comments));
    }

    pub async fn fail_comments(&self, file_key: &str, failure: MockFailure) {
        self.comments
            .lock()
            .await
            .insert(file_key.to_string(), Err(failure));
    }

    pub async fn set_structure(&self, file_key: &str, root: DocumentNode) {
        self.structures
            .lock()
            .await
            .insert(file_key.to_string(), Ok(root));
    }

    pub async fn fail_structure(&self, file_key: &str, failure: MockFailure) {
        self.structures
            .lock()
            .await
            .insert(file_key.to_string(), Err(failure));
    }

    /// Number of `list_comments` calls made for `file_key`.
    pub async fn comment_fetches(&self, file_key: &str) -> usize {
        self.comment_fetches
            .lock()
            .await
            .get(file_key)
            .copied()
            .unwrap_or(0)
    }

    /// Number of `get_structure` calls made for `file_key`.
    pub async fn structure_fetches(&self, file_key: &str) -> usize {
        self.structure_fetches
            .lock()
            .await
            .get(file_key)
            .copied()
            .unwrap_or(0)
    }
}

fn not_configured(file_key: &str) -> RedlineError {
    RedlineError::Transport {
        message: format!("mock API has no data for {file_key}"),
        status: Some(404),
        source: None,
    }
}

#[async_trait]
impl CommentProvider for MockRemote {
    async fn list_comments(&self, file_key: &str) -> Result<Vec<Comment>, RedlineError> {
        *self
            .comment_fetches
            .lock()
            .await
            .entry(file_key.to_string())
            .or_default() += 1;

        match self.comments.lock().await.get(file_key) {
            Some(Ok(comments)) => Ok(comments.clone()),
            Some(Err(failure)) => Err(failure.to_error(file_key)),
            None => Err(not_configured(file_key)),
        }
    }
}

#[async_trait]
impl StructureProvider for MockRemote {
    async fn get_structure(&self, file_key: &str) -> Result<DocumentNode, RedlineError> {
        *self
            .structure_fetches
            .lock()
            .await
            .entry(file_key.to_string())
            .or_default() += 1;

        match self.structures.lock().await.get(file_key) {
            Some(Ok(root)) => Ok(root.clone()),
            Some(Err(failure)) => Err(failure.to_error(file_key)),
            None => Err(not_configured(file_key)),
        }
    }
}
