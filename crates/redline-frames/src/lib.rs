// SPDX-FileCopyrightText: 2026 Redline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Frame resolution for Redline.
//!
//! Given a comment anchor (a node id, frequently the API's placeholder, and
//! an optional canvas point), work out which frame, component, or instance
//! the comment belongs to. Structure trees are fetched once per file and
//! kept in a time-bounded [`StructureCache`] together with every anchor
//! already resolved against them.

pub mod cache;
pub mod geometry;
pub mod resolver;
pub mod walker;

pub use cache::{StructureCache, StructureCacheEntry};
pub use resolver::{FrameResolver, point_key};
pub use walker::traverse;
