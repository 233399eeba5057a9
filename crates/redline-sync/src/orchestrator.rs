// SPDX-FileCopyrightText: 2026 Redline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! One sync pass over the configured source files.
//!
//! Files are processed sequentially. Failures talking to the remote API are
//! caught per file, logged, and reported; storage failures abort the pass.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use redline_config::model::{SourceFileConfig, SyncConfig};
use redline_core::{Clock, CommentProvider, DocumentStore, RedlineError, StoredDocument};
use redline_frames::FrameResolver;
use tracing::{debug, info, warn};

use crate::render::{self, CommentCounts, CommentEntry, DocumentHeader};

/// What triggered a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncMode {
    /// Periodic pass from the watch loop.
    Scheduled,
    /// User-requested pass. Starts from an empty structure cache.
    Manual,
}

/// Result of a pass for one source file.
#[derive(Debug, Clone, PartialEq)]
pub enum FileOutcome {
    Synced {
        path: PathBuf,
        total: usize,
        open: usize,
        resolved: usize,
    },
    /// Disabled file whose document was moved to the archive folder.
    Archived { path: PathBuf },
    /// Disabled file with nothing to do.
    Skipped,
    Failed { message: String, auth: bool },
}

#[derive(Debug, Clone, PartialEq)]
pub struct FileReport {
    pub id: String,
    pub name: String,
    pub outcome: FileOutcome,
}

/// Per-file outcomes of one pass.
#[derive(Debug, Clone)]
pub struct SyncReport {
    pub mode: SyncMode,
    pub started_at: DateTime<Utc>,
    pub files: Vec<FileReport>,
}

impl SyncReport {
    pub fn failed(&self) -> impl Iterator<Item = &FileReport> {
        self.files
            .iter()
            .filter(|f| matches!(f.outcome, FileOutcome::Failed { .. }))
    }

    pub fn has_failures(&self) -> bool {
        self.failed().next().is_some()
    }

    pub fn synced_count(&self) -> usize {
        self.files
            .iter()
            .filter(|f| matches!(f.outcome, FileOutcome::Synced { .. }))
            .count()
    }
}

/// Output settings of a pass, taken from the `[sync]` section.
#[derive(Debug, Clone)]
pub struct SyncSettings {
    pub output_folder: String,
    pub archive_folder: Option<String>,
    pub include_frame_info: bool,
}

impl From<&SyncConfig> for SyncSettings {
    fn from(config: &SyncConfig) -> Self {
        Self {
            output_folder: config.output_folder.clone(),
            archive_folder: config.archive_folder.clone(),
            include_frame_info: config.include_frame_info,
        }
    }
}

/// Runs sync passes. Owns the frame resolver, so passes on one orchestrator
/// never overlap.
pub struct SyncOrchestrator {
    comments: Arc<dyn CommentProvider>,
    store: Arc<dyn DocumentStore>,
    resolver: FrameResolver,
    clock: Arc<dyn Clock>,
    settings: SyncSettings,
}

impl SyncOrchestrator {
    pub fn new(
        comments: Arc<dyn CommentProvider>,
        store: Arc<dyn DocumentStore>,
        resolver: FrameResolver,
        clock: Arc<dyn Clock>,
        settings: SyncSettings,
    ) -> Self {
        Self {
            comments,
            store,
            resolver,
            clock,
            settings,
        }
    }

    pub fn resolver(&mut self) -> &mut FrameResolver {
        &mut self.resolver
    }

    /// Syncs every file in `files`, setting `last_sync` on each file that
    /// synced successfully.
    pub async fn run_pass(
        &mut self,
        files: &mut [SourceFileConfig],
        mode: SyncMode,
    ) -> Result<SyncReport, RedlineError> {
        let started_at = self.clock.now();
        info!(?mode, files = files.len(), "sync pass started");

        if mode == SyncMode::Manual {
            self.resolver.clear_cache();
        }
        self.store.ensure_folder(&self.settings.output_folder).await?;

        let mut reports = Vec::with_capacity(files.len());
        for file in files.iter_mut() {
            let outcome = if file.enabled {
                self.sync_enabled(file, started_at).await?
            } else {
                self.handle_disabled(file).await?
            };
            reports.push(FileReport {
                id: file.id.clone(),
                name: file.name.clone(),
                outcome,
            });
        }

        let report = SyncReport {
            mode,
            started_at,
            files: reports,
        };
        info!(
            synced = report.synced_count(),
            failed = report.failed().count(),
            "sync pass finished"
        );
        Ok(report)
    }

    async fn sync_enabled(
        &mut self,
        file: &mut SourceFileConfig,
        now: DateTime<Utc>,
    ) -> Result<FileOutcome, RedlineError> {
        match self.sync_file(file, now).await {
            Ok((path, counts)) => {
                file.last_sync = Some(now);
                info!(
                    file_key = %file.file_key,
                    path = %path.display(),
                    total = counts.total,
                    "file synced"
                );
                Ok(FileOutcome::Synced {
                    path,
                    total: counts.total,
                    open: counts.open,
                    resolved: counts.resolved,
                })
            }
            Err(e) if e.is_recoverable() => {
                warn!(
                    file_key = %file.file_key,
                    error = %e,
                    auth = e.is_auth(),
                    "file sync failed, continuing with next file"
                );
                Ok(FileOutcome::Failed {
                    message: e.to_string(),
                    auth: e.is_auth(),
                })
            }
            Err(e) => Err(e),
        }
    }

    async fn sync_file(
        &mut self,
        file: &SourceFileConfig,
        now: DateTime<Utc>,
    ) -> Result<(PathBuf, CommentCounts), RedlineError> {
        let comments = self.comments.list_comments(&file.file_key).await?;
        debug!(file_key = %file.file_key, count = comments.len(), "comments fetched");

        let mut entries = Vec::with_capacity(comments.len());
        for comment in comments {
            let frame = match (&comment.anchor, self.settings.include_frame_info) {
                (Some(anchor), true) => {
                    self.resolver
                        .resolve(&file.file_key, anchor.node_id.as_deref(), anchor.point)
                        .await
                }
                _ => None,
            };
            entries.push(CommentEntry { comment, frame });
        }

        let existing = self.store.find_by_key(&file.file_key).await?;
        let header = DocumentHeader {
            title: &file.name,
            file_key: &file.file_key,
            created: existing.as_ref().and_then(|d| d.created).unwrap_or(now),
            updated: now,
        };
        let (content, counts) = render::render_document(&header, entries)?;

        let path = match existing {
            Some(doc) => {
                let doc = self.unarchive(doc).await?;
                self.store.overwrite(&doc, &content).await?;
                doc.path
            }
            None => {
                self.store
                    .create(&self.settings.output_folder, &file.name, &content)
                    .await?
                    .path
            }
        };
        Ok((path, counts))
    }

    /// Moves a document out of the archive folder back into the output folder.
    async fn unarchive(&self, doc: StoredDocument) -> Result<StoredDocument, RedlineError> {
        match &self.settings.archive_folder {
            Some(archive) if in_folder(&doc.path, archive) => {
                info!(path = %doc.path.display(), "restoring archived document");
                self.store.move_to(&doc, &self.settings.output_folder).await
            }
            _ => Ok(doc),
        }
    }

    async fn handle_disabled(&self, file: &SourceFileConfig) -> Result<FileOutcome, RedlineError> {
        let Some(archive) = &self.settings.archive_folder else {
            return Ok(FileOutcome::Skipped);
        };
        let Some(doc) = self.store.find_by_key(&file.file_key).await? else {
            return Ok(FileOutcome::Skipped);
        };
        if in_folder(&doc.path, archive) {
            return Ok(FileOutcome::Skipped);
        }

        self.store.ensure_folder(archive).await?;
        let moved = self.store.move_to(&doc, archive).await?;
        info!(file_key = %file.file_key, path = %moved.path.display(), "document archived");
        Ok(FileOutcome::Archived { path: moved.path })
    }
}

/// True when `path` lies inside `folder` (both relative to the store root).
fn in_folder(path: &Path, folder: &str) -> bool {
    path.starts_with(folder.trim_matches('/'))
}
