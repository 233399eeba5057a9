// SPDX-FileCopyrightText: 2026 Redline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Traits for the external collaborators of the sync core.
//!
//! All collaborators use `#[async_trait]` so they can be held as
//! `Arc<dyn Trait>` and swapped for mocks in tests.

pub mod remote;
pub mod store;

pub use remote::{CommentProvider, StructureProvider};
pub use store::DocumentStore;
