// SPDX-FileCopyrightText: 2026 Redline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Checks semantic constraints serde attributes cannot express: URL schemes,
//! non-zero intervals, folder layout, and uniqueness of configured files.

use std::collections::HashSet;

use crate::diagnostic::ConfigError;
use crate::model::RedlineConfig;

/// Longest accepted watch interval: one year.
pub const MAX_INTERVAL_MINUTES: u64 = 365 * 24 * 60;

/// Longest accepted structure cache lifetime: one year.
pub const MAX_CACHE_TTL_HOURS: u64 = 365 * 24;

/// Deepest structure nesting the decoder and walker accept.
pub const MAX_STRUCTURE_DEPTH: usize = 1024;

/// Validate a deserialized configuration for semantic correctness.
///
/// Collects every failure instead of stopping at the first one.
pub fn validate_config(config: &RedlineConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();
    let mut fail = |message: String| errors.push(ConfigError::Validation { message });

    let base_url = config.remote.base_url.trim();
    if base_url.is_empty() {
        fail("remote.base_url must not be empty".to_string());
    } else if !(base_url.starts_with("https://") || base_url.starts_with("http://")) {
        fail(format!(
            "remote.base_url `{base_url}` must start with http:// or https://"
        ));
    }

    if config.remote.timeout_secs == 0 {
        fail("remote.timeout_secs must be at least 1".to_string());
    }

    if config.sync.interval_minutes == 0 {
        fail("sync.interval_minutes must be at least 1".to_string());
    } else if config.sync.interval_minutes > MAX_INTERVAL_MINUTES {
        fail(format!(
            "sync.interval_minutes must be at most {MAX_INTERVAL_MINUTES}"
        ));
    }

    if config.sync.documents_root.trim().is_empty() {
        fail("sync.documents_root must not be empty".to_string());
    }

    let output = normalize_folder(&config.sync.output_folder);
    if output.is_empty() {
        fail("sync.output_folder must not be empty".to_string());
    }

    if let Some(archive) = &config.sync.archive_folder {
        let archive = normalize_folder(archive);
        if archive.is_empty() {
            fail("sync.archive_folder must not be empty when set".to_string());
        } else if archive == output {
            fail(format!(
                "sync.archive_folder `{archive}` must differ from sync.output_folder"
            ));
        }
    }

    if config.frames.cache_ttl_hours == 0 {
        fail("frames.cache_ttl_hours must be at least 1".to_string());
    } else if config.frames.cache_ttl_hours > MAX_CACHE_TTL_HOURS {
        fail(format!(
            "frames.cache_ttl_hours must be at most {MAX_CACHE_TTL_HOURS}"
        ));
    }

    if config.frames.max_depth == 0 {
        fail("frames.max_depth must be at least 1".to_string());
    } else if config.frames.max_depth > MAX_STRUCTURE_DEPTH {
        fail(format!(
            "frames.max_depth must be at most {MAX_STRUCTURE_DEPTH}"
        ));
    }

    let mut seen_ids = HashSet::new();
    let mut seen_keys = HashSet::new();
    for (i, file) in config.files.iter().enumerate() {
        if file.id.trim().is_empty() {
            fail(format!("files[{i}].id must not be empty"));
        } else if !seen_ids.insert(file.id.as_str()) {
            fail(format!("duplicate file id `{}` in [[files]] array", file.id));
        }

        if file.file_key.trim().is_empty() {
            fail(format!("files[{i}].file_key must not be empty"));
        } else if !seen_keys.insert(file.file_key.as_str()) {
            fail(format!(
                "duplicate file_key `{}` in [[files]] array",
                file.file_key
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Strip surrounding whitespace and slashes so `Reviews/` equals `Reviews`.
fn normalize_folder(folder: &str) -> &str {
    folder.trim().trim_matches('/')
}
