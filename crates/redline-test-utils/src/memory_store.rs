// SPDX-FileCopyrightText: 2026 Redline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory document store.
//!
//! Mirrors the filesystem store closely enough for orchestrator tests:
//! documents are found by the `file_key:` line of their front matter, new
//! names are de-duplicated with a ` (n)` suffix, and folders are tracked so
//! tests can assert idempotent creation.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use redline_core::{DocumentStore, RedlineError, StoredDocument};

#[derive(Default)]
pub struct MemoryDocumentStore {
    docs: Mutex<BTreeMap<PathBuf, String>>,
    folders: Mutex<BTreeSet<String>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a document, e.g. one the user renamed by hand.
    pub async fn insert(&self, path: impl Into<PathBuf>, content: &str) {
        self.docs.lock().await.insert(path.into(), content.to_string());
    }

    pub async fn read(&self, path: impl AsRef<Path>) -> Option<String> {
        self.docs.lock().await.get(path.as_ref()).cloned()
    }

    pub async fn paths(&self) -> Vec<PathBuf> {
        self.docs.lock().await.keys().cloned().collect()
    }

    pub async fn folders(&self) -> Vec<String> {
        self.folders.lock().await.iter().cloned().collect()
    }

    fn free_path(docs: &BTreeMap<PathBuf, String>, folder: &str, stem: &str) -> PathBuf {
        let folder = Path::new(folder);
        let mut candidate = folder.join(format!("{stem}.md"));
        let mut n = 1;
        while docs.contains_key(&candidate) {
            candidate = folder.join(format!("{stem} ({n}).md"));
            n += 1;
        }
        candidate
    }
}

fn front_matter_value<'a>(content: &'a str, key: &str) -> Option<&'a str> {
    let body = content.strip_prefix("---\n")?;
    let end = body.find("\n---")?;
    body[..end].lines().find_map(|line| {
        line.strip_prefix(key)
            .and_then(|rest| rest.strip_prefix(':'))
            .map(|v| v.trim().trim_matches(|c| c == '"' || c == '\''))
    })
}

fn describe(path: &Path, content: &str) -> StoredDocument {
    StoredDocument {
        path: path.to_path_buf(),
        file_key: front_matter_value(content, "file_key").map(str::to_string),
        created: front_matter_value(content, "created")
            .and_then(|v| DateTime::parse_from_rfc3339(v).ok())
            .map(|d| d.with_timezone(&Utc)),
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn ensure_folder(&self, folder: &str) -> Result<(), RedlineError> {
        self.folders.lock().await.insert(folder.to_string());
        Ok(())
    }

    async fn find_by_key(&self, file_key: &str) -> Result<Option<StoredDocument>, RedlineError> {
        let docs = self.docs.lock().await;
        Ok(docs
            .iter()
            .map(|(path, content)| describe(path, content))
            .find(|doc| doc.file_key.as_deref() == Some(file_key)))
    }

    async fn create(
        &self,
        folder: &str,
        stem: &str,
        content: &str,
    ) -> Result<StoredDocument, RedlineError> {
        let mut docs = self.docs.lock().await;
        let path = Self::free_path(&docs, folder, stem);
        docs.insert(path.clone(), content.to_string());
        Ok(describe(&path, content))
    }

    async fn overwrite(&self, doc: &StoredDocument, content: &str) -> Result<(), RedlineError> {
        let mut docs = self.docs.lock().await;
        match docs.get_mut(&doc.path) {
            Some(existing) => {
                *existing = content.to_string();
                Ok(())
            }
            None => Err(RedlineError::Storage {
                source: Box::new(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("{} does not exist", doc.path.display()),
                )),
            }),
        }
    }

    async fn move_to(
        &self,
        doc: &StoredDocument,
        folder: &str,
    ) -> Result<StoredDocument, RedlineError> {
        let mut docs = self.docs.lock().await;
        let content = docs.remove(&doc.path).ok_or_else(|| RedlineError::Storage {
            source: Box::new(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{} does not exist", doc.path.display()),
            )),
        })?;
        let stem = doc
            .path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        let path = Self::free_path(&docs, folder, &stem);
        docs.insert(path.clone(), content);
        Ok(StoredDocument {
            path,
            ..doc.clone()
        })
    }
}
