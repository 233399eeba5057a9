// SPDX-FileCopyrightText: 2026 Redline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./redline.toml` > `~/.config/redline/redline.toml` > `/etc/redline/redline.toml`
//! with environment variable overrides via `REDLINE_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::RedlineConfig;

/// System-wide config file.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/redline/redline.toml";

/// Config file in the working directory.
pub const LOCAL_CONFIG_PATH: &str = "redline.toml";

/// User config file under the XDG config directory.
pub fn user_config_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("redline/redline.toml"))
        .unwrap_or_default()
}

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/redline/redline.toml` (system-wide)
/// 3. `~/.config/redline/redline.toml` (user XDG config)
/// 4. `./redline.toml` (local directory)
/// 5. `REDLINE_*` environment variables
pub fn load_config() -> Result<RedlineConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<RedlineConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(RedlineConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<RedlineConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(RedlineConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading.
///
/// Returns the Figment before extraction so callers can inspect metadata.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(RedlineConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(user_config_path()))
        .merge(Toml::file(LOCAL_CONFIG_PATH))
        .merge(env_provider())
}

/// Create the environment variable provider using explicit `map()` for section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` because key names contain
/// underscores: `REDLINE_REMOTE_ACCESS_TOKEN` must map to
/// `remote.access_token`, not `remote.access.token`.
fn env_provider() -> Env {
    Env::prefixed("REDLINE_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: REDLINE_SYNC_OUTPUT_FOLDER -> "sync_output_folder"
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("logging_", "logging.", 1)
            .replacen("remote_", "remote.", 1)
            .replacen("sync_", "sync.", 1)
            .replacen("frames_", "frames.", 1);
        mapped.into()
    })
}
