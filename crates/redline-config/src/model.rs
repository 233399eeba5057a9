// SPDX-FileCopyrightText: 2026 Redline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for Redline.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Top-level Redline configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RedlineConfig {
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Design-review API settings.
    #[serde(default)]
    pub remote: RemoteConfig,

    /// Sync pass and document output settings.
    #[serde(default)]
    pub sync: SyncConfig,

    /// Frame resolution settings.
    #[serde(default)]
    pub frames: FramesConfig,

    /// Source files to sync.
    #[serde(default)]
    pub files: Vec<SourceFileConfig>,
}

impl RedlineConfig {
    /// Source files with `enabled = true`.
    pub fn enabled_files(&self) -> impl Iterator<Item = &SourceFileConfig> {
        self.files.iter().filter(|f| f.enabled)
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Design-review API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RemoteConfig {
    /// API base URL, without a trailing `/v1`.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Personal access token. `None` requires `REDLINE_REMOTE_ACCESS_TOKEN`.
    #[serde(default)]
    pub access_token: Option<String>,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Retries for transient statuses (429, 5xx).
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            access_token: None,
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
        }
    }
}

fn default_base_url() -> String {
    "https://api.figma.com".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    1
}

/// Sync pass and document output configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SyncConfig {
    /// Root directory of the document store.
    #[serde(default = "default_documents_root")]
    pub documents_root: String,

    /// Folder (relative to the root) that receives rendered documents.
    #[serde(default = "default_output_folder")]
    pub output_folder: String,

    /// Folder that receives documents of disabled files. `None` leaves them in place.
    #[serde(default)]
    pub archive_folder: Option<String>,

    /// Minutes between scheduled passes in `watch` mode.
    #[serde(default = "default_interval_minutes")]
    pub interval_minutes: u64,

    /// Annotate comments with the frame they were placed on.
    #[serde(default = "default_true")]
    pub include_frame_info: bool,

    /// Run a pass immediately when `watch` starts.
    #[serde(default = "default_true")]
    pub sync_on_start: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            documents_root: default_documents_root(),
            output_folder: default_output_folder(),
            archive_folder: None,
            interval_minutes: default_interval_minutes(),
            include_frame_info: true,
            sync_on_start: true,
        }
    }
}

fn default_documents_root() -> String {
    dirs::data_dir()
        .map(|p| p.join("redline").join("documents"))
        .unwrap_or_else(|| std::path::PathBuf::from("./documents"))
        .to_string_lossy()
        .to_string()
}

fn default_output_folder() -> String {
    "Design Comments".to_string()
}

fn default_interval_minutes() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

/// Frame resolution configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FramesConfig {
    /// Hours a fetched structure tree stays valid in the cache.
    #[serde(default = "default_cache_ttl_hours")]
    pub cache_ttl_hours: u64,

    /// Node id the API uses for comments without a real anchor.
    #[serde(default = "default_placeholder_node_id")]
    pub placeholder_node_id: String,

    /// Maximum nesting depth accepted in a structure tree.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

impl Default for FramesConfig {
    fn default() -> Self {
        Self {
            cache_ttl_hours: default_cache_ttl_hours(),
            placeholder_node_id: default_placeholder_node_id(),
            max_depth: default_max_depth(),
        }
    }
}

fn default_cache_ttl_hours() -> u64 {
    24
}

fn default_placeholder_node_id() -> String {
    "0:1".to_string()
}

fn default_max_depth() -> usize {
    512
}

/// A source file the user wants synced.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SourceFileConfig {
    /// Local identifier, unique within the config.
    pub id: String,

    /// Display name; also the stem of newly created documents.
    pub name: String,

    /// Remote file key on the design-review API.
    pub file_key: String,

    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Time of the last successful sync. Process-lifetime only: never read
    /// from or written to disk.
    #[serde(skip)]
    pub last_sync: Option<DateTime<Utc>>,
}

impl SourceFileConfig {
    pub fn new(id: impl Into<String>, name: impl Into<String>, file_key: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            file_key: file_key.into(),
            enabled: true,
            last_sync: None,
        }
    }
}
