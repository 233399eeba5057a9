// SPDX-FileCopyrightText: 2026 Redline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the design-review REST API.
//!
//! Provides [`FigmaClient`] which handles authentication, timeouts, status
//! mapping, and retry of transient errors. Response bodies are returned as
//! text; decoding into domain types lives in [`crate::types`].

use std::time::Duration;

use redline_core::RedlineError;
use reqwest::StatusCode;
use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, warn};

/// Header carrying the personal access token.
const TOKEN_HEADER: &str = "X-Figma-Token";

/// Longest body excerpt kept in error messages.
const BODY_EXCERPT_CHARS: usize = 200;

/// HTTP client for design-review API communication.
#[derive(Debug, Clone)]
pub struct FigmaClient {
    client: reqwest::Client,
    base_url: String,
    max_retries: u32,
}

impl FigmaClient {
    /// Creates a client authenticating every request with `token`.
    ///
    /// `base_url` is the API origin without the `/v1` prefix; a trailing
    /// slash is ignored.
    pub fn new(
        token: &SecretString,
        base_url: &str,
        timeout: Duration,
        max_retries: u32,
    ) -> Result<Self, RedlineError> {
        let mut token_value = HeaderValue::from_str(token.expose_secret())
            .map_err(|e| RedlineError::Config(format!("invalid access token header value: {e}")))?;
        token_value.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(TOKEN_HEADER, token_value);
        headers.insert("accept", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| RedlineError::transport(format!("failed to build HTTP client: {e}"), e))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            max_retries,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET {base}/v1/{path}` returning the body of a 2xx response.
    ///
    /// On transient errors (429, 500, 502, 503, 504), retries up to
    /// `max_retries` times after a 1-second delay.
    pub async fn get(&self, path: &str) -> Result<String, RedlineError> {
        let url = format!("{}/v1/{}", self.base_url, path.trim_start_matches('/'));
        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                warn!(attempt, url = %url, "retrying request after transient error");
                tokio::time::sleep(Duration::from_secs(1)).await;
            }

            let response = self.client.get(&url).send().await.map_err(|e| {
                RedlineError::transport(format!("HTTP request to {url} failed: {e}"), e)
            })?;

            let status = response.status();
            debug!(status = %status, attempt, url = %url, "response received");

            if status.is_success() {
                return response.text().await.map_err(|e| {
                    RedlineError::transport(format!("failed to read response body: {e}"), e)
                });
            }

            let body = response.text().await.unwrap_or_default();
            let error = status_error(status, &body);

            if is_transient_error(status) && attempt < self.max_retries {
                warn!(status = %status, "transient error, will retry");
                last_error = Some(error);
                continue;
            }

            return Err(error);
        }

        Err(last_error.unwrap_or_else(|| RedlineError::Transport {
            message: format!("request to {url} failed after retries"),
            status: None,
            source: None,
        }))
    }
}

/// Maps a non-success status to the error taxonomy.
fn status_error(status: StatusCode, body: &str) -> RedlineError {
    let excerpt = excerpt(body);
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => RedlineError::Auth {
            message: format!("API returned {status}: {excerpt}"),
        },
        _ => RedlineError::Transport {
            message: format!("API returned {status}: {excerpt}"),
            status: Some(status.as_u16()),
            source: None,
        },
    }
}

fn excerpt(body: &str) -> String {
    let trimmed = body.trim();
    match trimmed.char_indices().nth(BODY_EXCERPT_CHARS) {
        Some((cut, _)) => format!("{}...", &trimmed[..cut]),
        None => trimmed.to_string(),
    }
}

/// Returns true for HTTP status codes that indicate transient errors worth retrying.
fn is_transient_error(status: StatusCode) -> bool {
    matches!(status.as_u16(), 429 | 500 | 502 | 503 | 504)
}
