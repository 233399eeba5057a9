// SPDX-FileCopyrightText: 2026 Redline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Time-bounded cache of fetched structure trees and resolved anchors.
//!
//! Each source file gets one entry holding the structure snapshot and every
//! anchor resolved against it. Expiry is checked on every read: an entry
//! older than the validity window is evicted together with its resolutions,
//! never swept in the background.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use redline_core::{Clock, DocumentNode, FrameInfo};
use tracing::debug;

/// Per-file cache record.
#[derive(Debug, Clone)]
pub struct StructureCacheEntry {
    pub file_key: String,
    pub last_updated: DateTime<Utc>,
    resolved: HashMap<String, FrameInfo>,
    structure: Option<Arc<DocumentNode>>,
}

impl StructureCacheEntry {
    fn new(file_key: &str, now: DateTime<Utc>, structure: Option<Arc<DocumentNode>>) -> Self {
        Self {
            file_key: file_key.to_string(),
            last_updated: now,
            resolved: HashMap::new(),
            structure,
        }
    }

    /// The structure snapshot, if one was fetched for this entry.
    pub fn structure(&self) -> Option<Arc<DocumentNode>> {
        self.structure.clone()
    }

    pub fn resolved_count(&self) -> usize {
        self.resolved.len()
    }
}

/// Cache of structure trees and resolved frame info, keyed by file key.
pub struct StructureCache {
    entries: HashMap<String, StructureCacheEntry>,
    validity: TimeDelta,
    clock: Arc<dyn Clock>,
}

impl StructureCache {
    pub fn new(validity: TimeDelta, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: HashMap::new(),
            validity,
            clock,
        }
    }

    /// Returns the entry for `file_key` if it is younger than the validity
    /// window; an expired entry is evicted and `None` returned.
    pub fn get(&mut self, file_key: &str) -> Option<&StructureCacheEntry> {
        self.evict_if_expired(file_key);
        self.entries.get(file_key)
    }

    /// Creates or replaces the entry for `file_key` with a fresh timestamp,
    /// no resolutions, and the given structure.
    pub fn put(&mut self, file_key: &str, structure: Arc<DocumentNode>) {
        let entry = StructureCacheEntry::new(file_key, self.clock.now(), Some(structure));
        self.entries.insert(file_key.to_string(), entry);
        debug!(file_key, "structure cached");
    }

    /// Looks up a previously resolved anchor in a still-valid entry.
    pub fn get_resolved(&mut self, file_key: &str, key: &str) -> Option<FrameInfo> {
        self.get(file_key)
            .and_then(|entry| entry.resolved.get(key))
            .cloned()
    }

    /// Stores a resolved anchor, creating a structure-less entry if the file
    /// has none yet.
    pub fn put_resolved(&mut self, file_key: &str, key: &str, info: FrameInfo) {
        self.evict_if_expired(file_key);
        let now = self.clock.now();
        self.entries
            .entry(file_key.to_string())
            .or_insert_with(|| StructureCacheEntry::new(file_key, now, None))
            .resolved
            .insert(key.to_string(), info);
    }

    /// Drops every entry and all resolutions with them.
    pub fn clear(&mut self) {
        let dropped = self.entries.len();
        self.entries.clear();
        debug!(dropped, "structure cache cleared");
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn evict_if_expired(&mut self, file_key: &str) {
        let now = self.clock.now();
        let expired = self
            .entries
            .get(file_key)
            .is_some_and(|entry| now - entry.last_updated >= self.validity);
        if expired {
            self.entries.remove(file_key);
            debug!(file_key, "structure cache entry expired");
        }
    }
}
