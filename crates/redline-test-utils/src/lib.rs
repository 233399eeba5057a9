// SPDX-FileCopyrightText: 2026 Redline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Redline.
//!
//! Provides mock collaborators for fast, deterministic tests without network
//! or filesystem access.
//!
//! # Components
//!
//! - [`MockRemote`] - comment and structure provider with fetch counters
//! - [`MemoryDocumentStore`] - in-memory document store
//! - [`ManualClock`] - clock that only moves when told to
//! - [`fixtures`] - a sample structure tree and comment builders

pub mod clock;
pub mod fixtures;
pub mod memory_store;
pub mod mock_remote;

pub use clock::ManualClock;
pub use memory_store::MemoryDocumentStore;
pub use mock_remote::{MockFailure, MockRemote};
