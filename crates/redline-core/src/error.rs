// SPDX-FileCopyrightText: 2026 Redline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for Redline.

use thiserror::Error;

/// The primary error type shared by the remote client, the document store,
/// the frame resolver, and the sync orchestrator.
///
/// An absent anchor or node is not an error: lookups return `Option`.
#[derive(Debug, Error)]
pub enum RedlineError {
    /// Configuration errors (invalid TOML, bad header values, missing token).
    #[error("configuration error: {0}")]
    Config(String),

    /// Network or HTTP failure talking to the design-review API.
    #[error("transport error: {message}")]
    Transport {
        message: String,
        /// HTTP status when the server answered, `None` for connection failures.
        status: Option<u16>,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The API rejected the access token.
    #[error("authentication rejected: {message}")]
    Auth { message: String },

    /// The fetched structure graph does not have the expected shape.
    #[error("malformed structure: {0}")]
    MalformedStructure(String),

    /// Document store failure (filesystem unavailable, permission denied).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl RedlineError {
    /// Builds a `Transport` error without an HTTP status.
    pub fn transport(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        RedlineError::Transport {
            message: message.into(),
            status: None,
            source: Some(Box::new(source)),
        }
    }

    /// True for transport failures, including rejected credentials.
    ///
    /// Auth errors are reported distinctly to the user but take the same
    /// recovery path as any other transport failure.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            RedlineError::Transport { .. } | RedlineError::Auth { .. }
        )
    }

    /// True when the API rejected the credential.
    pub fn is_auth(&self) -> bool {
        matches!(self, RedlineError::Auth { .. })
    }

    /// True for errors that only affect one source file and must not abort
    /// a sync pass.
    pub fn is_recoverable(&self) -> bool {
        self.is_transport() || matches!(self, RedlineError::MalformedStructure(_))
    }
}

impl From<std::io::Error> for RedlineError {
    fn from(e: std::io::Error) -> Self {
        RedlineError::Storage {
            source: Box::new(e),
        }
    }
}
