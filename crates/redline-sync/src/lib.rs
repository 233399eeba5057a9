// SPDX-FileCopyrightText: 2026 Redline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Sync orchestration for Redline.
//!
//! A pass fetches each enabled file's comments, annotates them with the
//! frame they were placed on, renders one Markdown document per file, and
//! writes it through the document store, updating a document found by its
//! recorded file key rather than by file name.

pub mod orchestrator;
pub mod render;
pub mod scheduler;

pub use orchestrator::{
    FileOutcome, FileReport, SyncMode, SyncOrchestrator, SyncReport, SyncSettings,
};
pub use render::{CommentCounts, CommentEntry, DocumentHeader, render_document};
pub use scheduler::{WatchSettings, install_signal_handler, watch};
