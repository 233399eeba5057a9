// SPDX-FileCopyrightText: 2026 Redline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for Redline.
//!
//! This crate provides the error taxonomy, the data model (comments, the
//! document structure tree, resolved frame info), and the traits for the
//! external collaborators the sync core talks to: the comment and structure
//! providers and the document store.

pub mod clock;
pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use clock::{Clock, SystemClock};
pub use error::RedlineError;
pub use traits::{CommentProvider, DocumentStore, StructureProvider};
pub use types::{
    Anchor, BoundingBox, Comment, DocumentNode, FrameInfo, NodeKind, Point, StoredDocument,
};
