// SPDX-FileCopyrightText: 2026 Prism Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for Prism provider bindings.

use std::str::FromStr;

use strum::EnumString;
use thiserror::Error;

/// The primary error type returned by result converters.
///
/// A conversion either yields a result or exactly one of these errors, never both.
#[derive(Debug, Error)]
pub enum PrismError {
    /// The provider blocked the requested or generated content.
    #[error("content filtered by provider: {message}")]
    ContentFilter { message: String },

    /// The provider rejected the request as malformed.
    #[error("invalid request: {message}")]
    InvalidRequest { message: String },

    /// Provider error envelope with a code no binding classifies.
    #[error("provider error ({code}): {message}")]
    Provider { code: String, message: String },

    /// The payload does not have the shape the binding expects.
    #[error("malformed provider response: {message}")]
    MalformedResponse {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Server-sent event decoding or transport failure while streaming.
    #[error("stream error: {message}")]
    Stream {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The conversion options disagree with the shape of the raw result.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A binding could not be built from its configuration.
    #[error("configuration error: {0}")]
    Config(String),
}

impl PrismError {
    /// Classifies a provider error envelope by its wire `code`.
    ///
    /// The message is carried through verbatim.
    pub fn from_provider(code: &str, message: impl Into<String>) -> Self {
        let message = message.into();
        match ProviderErrorCode::classify(code) {
            ProviderErrorCode::ContentFilter => Self::ContentFilter { message },
            ProviderErrorCode::InvalidRequest => Self::InvalidRequest { message },
            ProviderErrorCode::Other(code) => Self::Provider { code, message },
        }
    }

    /// Shorthand for a [`PrismError::MalformedResponse`] without a source.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse {
            message: message.into(),
            source: None,
        }
    }
}

/// Error codes found in a provider's `error.code` field.
#[derive(Debug, Clone, PartialEq, Eq, EnumString)]
pub enum ProviderErrorCode {
    #[strum(serialize = "content_filter")]
    ContentFilter,
    #[strum(serialize = "invalid_request_error")]
    InvalidRequest,
    #[strum(default)]
    Other(String),
}

impl ProviderErrorCode {
    /// Parses a wire code; unrecognized codes become [`ProviderErrorCode::Other`].
    pub fn classify(code: &str) -> Self {
        Self::from_str(code).unwrap_or_else(|_| Self::Other(code.to_string()))
    }
}
