// SPDX-License-Identifier: GPL-3.0-or-later

use reqwest::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DiscogsError>;

/// Quota exhaustion announced by Discogs through the `X-RateLimit-*` headers.
///
/// Both fields are copied verbatim from the companion headers; either may be
/// absent. No retry guidance is derived from them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("rate limit exhausted (type: {limit_type:?}, reset: {reset:?})")]
pub struct RateLimitError {
    /// Value of `X-RateLimit-Type`, when it was a single word.
    pub limit_type: Option<String>,
    /// Value of `X-RateLimit-Reset` (epoch seconds), when it was all digits.
    pub reset: Option<u64>,
}

/// Error type returned by the Discogs client and its cursors.
#[derive(Debug, Error)]
pub enum DiscogsError {
    /// The request never produced a response (connection, DNS, timeout or protocol failure).
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Discogs responded with a non-success HTTP status code.
    #[error("HTTP status {status}: {body}")]
    HttpStatus { status: StatusCode, body: String },

    /// Discogs returned a JSON payload with a `message` field describing an API-level error.
    #[error("Discogs API error: {message}")]
    Api { message: String },

    /// The body was not valid JSON.
    #[error("Deserialization error: {0}")]
    Deserialization(#[from] serde_json::Error),

    /// A required field was absent from an otherwise well-formed document.
    #[error("Missing expected field: {0}")]
    MissingField(&'static str),

    #[error(transparent)]
    RateLimited(#[from] RateLimitError),

    /// A caller or server broke a precondition: reading an unbound cursor,
    /// non-numeric pagination counters, items without a numeric `id`.
    #[error("Contract violation: {0}")]
    ContractViolation(String),

    #[error("Invalid user agent {0:?}: expected something like `MyClient/1.0 +http://example.org`")]
    InvalidUserAgent(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl DiscogsError {
    pub(crate) fn contract(message: impl Into<String>) -> Self {
        Self::ContractViolation(message.into())
    }
}
