// SPDX-FileCopyrightText: 2026 Redline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Markdown rendering of a source file's comments.
//!
//! A document is YAML front matter (metadata and aggregate counts), a
//! heading, a one-line summary, and one checkbox entry per comment, newest
//! first. Checked means resolved.

use chrono::{DateTime, Utc};
use redline_core::{Comment, FrameInfo, RedlineError};
use serde::Serialize;

/// Indentation of continuation and meta lines under an entry.
const INDENT: &str = "    ";

/// Separator between the parts of an entry's meta line.
const META_SEPARATOR: &str = " · ";

/// A comment with the frame it was placed on, if known.
#[derive(Debug, Clone, PartialEq)]
pub struct CommentEntry {
    pub comment: Comment,
    pub frame: Option<FrameInfo>,
}

/// Document-level metadata.
#[derive(Debug, Clone)]
pub struct DocumentHeader<'a> {
    pub title: &'a str,
    pub file_key: &'a str,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

/// Aggregate comment counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommentCounts {
    pub total: usize,
    pub open: usize,
    pub resolved: usize,
}

impl CommentCounts {
    pub fn of<'a>(comments: impl IntoIterator<Item = &'a Comment>) -> Self {
        comments.into_iter().fold(Self::default(), |mut counts, c| {
            counts.total += 1;
            if c.is_resolved() {
                counts.resolved += 1;
            } else {
                counts.open += 1;
            }
            counts
        })
    }
}

/// Front matter, serialized in declaration order.
#[derive(Serialize)]
struct FrontMatter<'a> {
    title: &'a str,
    created: DateTime<Utc>,
    updated: DateTime<Utc>,
    file_key: &'a str,
    total_comments: usize,
    open_comments: usize,
    resolved_comments: usize,
}

/// Renders the full document. Entries are ordered by creation time,
/// newest first; entries created at the same instant keep their input order.
pub fn render_document(
    header: &DocumentHeader<'_>,
    mut entries: Vec<CommentEntry>,
) -> Result<(String, CommentCounts), RedlineError> {
    entries.sort_by(|a, b| b.comment.created_at.cmp(&a.comment.created_at));
    let counts = CommentCounts::of(entries.iter().map(|e| &e.comment));

    let front_matter = serde_yaml::to_string(&FrontMatter {
        title: header.title,
        created: header.created,
        updated: header.updated,
        file_key: header.file_key,
        total_comments: counts.total,
        open_comments: counts.open,
        resolved_comments: counts.resolved,
    })
    .map_err(|e| RedlineError::Internal(format!("failed to serialize front matter: {e}")))?;

    let mut out = String::new();
    out.push_str("---\n");
    out.push_str(&front_matter);
    out.push_str("---\n\n");
    out.push_str(&format!("# {}\n\n", header.title));
    out.push_str(&summary_line(counts, header.updated));
    out.push_str("\n\n## Comments\n\n");

    if entries.is_empty() {
        out.push_str("_No comments yet._\n");
    }
    for entry in &entries {
        out.push_str(&render_entry(entry));
    }

    Ok((out, counts))
}

fn summary_line(counts: CommentCounts, updated: DateTime<Utc>) -> String {
    let noun = if counts.total == 1 { "comment" } else { "comments" };
    format!(
        "{} {noun}: {} open, {} resolved. Last synced {}.",
        counts.total,
        counts.open,
        counts.resolved,
        updated.format("%Y-%m-%d %H:%M UTC")
    )
}

/// One checkbox entry with its indented continuation and meta lines.
pub fn render_entry(entry: &CommentEntry) -> String {
    let comment = &entry.comment;
    let checkbox = if comment.is_resolved() { "[x]" } else { "[ ]" };
    let reply = if comment.is_reply() { " (reply)" } else { "" };

    let mut lines = comment.message.trim_end().lines();
    let first = lines.next().unwrap_or_default();

    let mut out = format!(
        "- {checkbox} **{}**{reply} {first}",
        comment.created_at.format("%Y-%m-%d %H:%M UTC")
    );
    out.truncate(out.trim_end().len());
    out.push('\n');

    for line in lines {
        if line.trim().is_empty() {
            out.push('\n');
        } else {
            out.push_str(INDENT);
            out.push_str(line);
            out.push('\n');
        }
    }

    out.push_str(INDENT);
    out.push_str(&meta_line(entry));
    out.push('\n');
    out
}

fn meta_line(entry: &CommentEntry) -> String {
    let comment = &entry.comment;
    let mut parts = vec![format!("@{}", comment.author)];
    if let Some(frame) = &entry.frame {
        parts.push(format!("Frame: {} ({})", frame.full_path, frame.page_name));
    }
    parts.push(match comment.resolved_at {
        Some(at) => format!("Resolved {}", at.format("%Y-%m-%d")),
        None => "Open".to_string(),
    });
    parts.join(META_SEPARATOR)
}
