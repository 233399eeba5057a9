// SPDX-FileCopyrightText: 2026 Redline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Filesystem document store for Redline.
//!
//! Documents are Markdown files under a root directory. A document belongs
//! to a source file when its YAML front matter records that file's key, so
//! a document keeps receiving updates after the user renames or moves it.

pub mod front_matter;

use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use redline_core::{DocumentStore, RedlineError, StoredDocument};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

/// Characters that cannot appear in a document file name.
const FORBIDDEN_CHARS: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// File name used when a sanitized stem ends up empty.
const FALLBACK_STEM: &str = "Untitled";

/// Markdown document store rooted at a directory.
#[derive(Debug, Clone)]
pub struct MarkdownStore {
    root: PathBuf,
}

impl MarkdownStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute path of a document or folder given relative to the root.
    pub fn absolute(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.root.join(relative)
    }

    fn folder_path(&self, folder: &str) -> Result<PathBuf, RedlineError> {
        let relative = Path::new(folder.trim_matches('/'));
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes {
            return Err(RedlineError::Config(format!(
                "folder `{folder}` must be relative to the documents root"
            )));
        }
        Ok(self.root.join(relative))
    }

    fn relative(&self, absolute: &Path) -> PathBuf {
        absolute
            .strip_prefix(&self.root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| absolute.to_path_buf())
    }
}

/// Replaces characters that are not allowed in file names and trims
/// whitespace and trailing dots.
pub fn sanitize_stem(stem: &str) -> String {
    let replaced: String = stem
        .chars()
        .map(|c| if FORBIDDEN_CHARS.contains(&c) || c.is_control() { '-' } else { c })
        .collect();
    let trimmed = replaced.trim().trim_end_matches('.').trim_end();
    if trimmed.is_empty() {
        FALLBACK_STEM.to_string()
    } else {
        trimmed.to_string()
    }
}

/// `{stem}.md`, then `{stem} (1).md`, `{stem} (2).md`, ...
fn candidate_name(stem: &str, attempt: usize) -> String {
    if attempt == 0 {
        format!("{stem}.md")
    } else {
        format!("{stem} ({attempt}).md")
    }
}

/// Scans `root` for the first Markdown document recording `file_key`.
///
/// Runs on a blocking thread. Unreadable files are logged and skipped.
fn scan_for_key(root: &Path, file_key: &str) -> Option<(PathBuf, front_matter::FrontMatter)> {
    let walker = walkdir::WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            entry.depth() == 0 || !entry.file_name().to_string_lossy().starts_with('.')
        })
        .filter_map(std::result::Result::ok);

    for entry in walker {
        let path = entry.path();
        if !entry.file_type().is_file() || path.extension().is_none_or(|ext| ext != "md") {
            continue;
        }

        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "skipping unreadable document");
                continue;
            }
        };

        if let Some(fm) = front_matter::parse(&content)
            && fm.file_key().as_deref() == Some(file_key)
        {
            return Some((path.to_path_buf(), fm));
        }
    }
    None
}

#[async_trait]
impl DocumentStore for MarkdownStore {
    async fn ensure_folder(&self, folder: &str) -> Result<(), RedlineError> {
        let path = self.folder_path(folder)?;
        tokio::fs::create_dir_all(&path).await?;
        Ok(())
    }

    async fn find_by_key(&self, file_key: &str) -> Result<Option<StoredDocument>, RedlineError> {
        if !tokio::fs::try_exists(&self.root).await? {
            return Ok(None);
        }

        let root = self.root.clone();
        let key = file_key.to_string();
        let found = tokio::task::spawn_blocking(move || scan_for_key(&root, &key))
            .await
            .map_err(|e| RedlineError::Internal(format!("document scan task failed: {e}")))?;

        Ok(found.map(|(path, fm)| {
            debug!(file_key, path = %path.display(), "existing document found");
            StoredDocument {
                path: self.relative(&path),
                file_key: fm.file_key(),
                created: fm.created,
            }
        }))
    }

    async fn create(
        &self,
        folder: &str,
        stem: &str,
        content: &str,
    ) -> Result<StoredDocument, RedlineError> {
        let dir = self.folder_path(folder)?;
        tokio::fs::create_dir_all(&dir).await?;
        let stem = sanitize_stem(stem);

        let mut attempt = 0;
        loop {
            let path = dir.join(candidate_name(&stem, attempt));
            let opened = tokio::fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await;

            match opened {
                Ok(mut file) => {
                    file.write_all(content.as_bytes()).await?;
                    file.flush().await?;
                    info!(path = %path.display(), "document created");
                    let fm = front_matter::parse(content).unwrap_or_default();
                    return Ok(StoredDocument {
                        path: self.relative(&path),
                        file_key: fm.file_key(),
                        created: fm.created,
                    });
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists => attempt += 1,
                Err(e) => return Err(e.into()),
            }
        }
    }

    async fn overwrite(&self, doc: &StoredDocument, content: &str) -> Result<(), RedlineError> {
        let path = self.absolute(&doc.path);
        tokio::fs::write(&path, content).await?;
        debug!(path = %path.display(), "document overwritten");
        Ok(())
    }

    async fn move_to(
        &self,
        doc: &StoredDocument,
        folder: &str,
    ) -> Result<StoredDocument, RedlineError> {
        let from = self.absolute(&doc.path);
        let dir = self.folder_path(folder)?;
        if from.parent() == Some(dir.as_path()) {
            return Ok(doc.clone());
        }
        tokio::fs::create_dir_all(&dir).await?;

        let stem = from
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| FALLBACK_STEM.to_string());

        let mut attempt = 0;
        let to = loop {
            let candidate = dir.join(candidate_name(&stem, attempt));
            if !tokio::fs::try_exists(&candidate).await? {
                break candidate;
            }
            attempt += 1;
        };

        tokio::fs::rename(&from, &to).await?;
        info!(from = %from.display(), to = %to.display(), "document moved");

        Ok(StoredDocument {
            path: self.relative(&to),
            ..doc.clone()
        })
    }
}
