// SPDX-FileCopyrightText: 2026 Redline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Design-review REST API adapter for Redline.
//!
//! This crate implements [`CommentProvider`] and [`StructureProvider`] over
//! HTTP. Access token resolution order: `remote.access_token` from config
//! (which the `REDLINE_REMOTE_ACCESS_TOKEN` environment variable overrides)
//! then error.

pub mod client;
pub mod types;

use std::time::Duration;

use async_trait::async_trait;
use redline_config::model::RedlineConfig;
use redline_core::{Comment, CommentProvider, DocumentNode, RedlineError, StructureProvider};
use secrecy::SecretString;
use tracing::{debug, info};

use crate::client::FigmaClient;

/// Comment and structure provider backed by the REST API.
pub struct FigmaRemote {
    client: FigmaClient,
    max_depth: usize,
}

impl FigmaRemote {
    /// Creates the provider from the `[remote]` and `[frames]` config sections.
    pub fn new(config: &RedlineConfig) -> Result<Self, RedlineError> {
        let token = resolve_access_token(&config.remote.access_token)?;
        let client = FigmaClient::new(
            &token,
            &config.remote.base_url,
            Duration::from_secs(config.remote.timeout_secs),
            config.remote.max_retries,
        )?;

        info!(base_url = %client.base_url(), "remote API client initialized");

        Ok(Self::with_client(client, config.frames.max_depth))
    }

    pub fn with_client(client: FigmaClient, max_depth: usize) -> Self {
        Self { client, max_depth }
    }
}

#[async_trait]
impl CommentProvider for FigmaRemote {
    async fn list_comments(&self, file_key: &str) -> Result<Vec<Comment>, RedlineError> {
        let body = self.client.get(&format!("files/{file_key}/comments")).await?;
        let comments = types::decode_comments(&body)?;
        debug!(file_key, count = comments.len(), "comments fetched");
        Ok(comments)
    }
}

#[async_trait]
impl StructureProvider for FigmaRemote {
    async fn get_structure(&self, file_key: &str) -> Result<DocumentNode, RedlineError> {
        let body = self
            .client
            .get(&format!("files/{file_key}?geometry=paths"))
            .await?;
        let root = types::decode_structure(&body, self.max_depth)?;
        debug!(file_key, pages = root.children.len(), "structure fetched");
        Ok(root)
    }
}

/// Resolves the access token from config, treating an empty value as unset.
fn resolve_access_token(config_token: &Option<String>) -> Result<SecretString, RedlineError> {
    match config_token {
        Some(token) if !token.trim().is_empty() => Ok(SecretString::from(token.trim().to_string())),
        _ => Err(RedlineError::Config(
            "access token not found. Set remote.access_token in config or the REDLINE_REMOTE_ACCESS_TOKEN environment variable.".into(),
        )),
    }
}
