//! Task-board wire types and API errors.
//!
//! Cards, boards and lists mirror the remote service's JSON shapes. Only
//! `Card::name` and `Card::starred` are interpreted by this crate; the
//! remaining fields are carried through untouched.

use std::fmt;

use serde::{Deserialize, Serialize};

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by card-query operations.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The HTTP request never produced a response (connect, timeout, TLS).
    #[error("API request failed: {0}")]
    Request(String),

    /// The service answered with a non-success HTTP status.
    #[error("API response error: status {status}")]
    Status { status: u16, body: String },

    /// The response body could not be deserialized.
    #[error("API response parse failed: {0}")]
    Decode(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),

    /// The configured base URL cannot have paths appended to it.
    #[error("invalid API base URL: {0}")]
    InvalidBaseUrl(String),

    /// An id that cannot name a path segment (empty, `.` or `..`).
    #[error("invalid board or list id: {0:?}")]
    InvalidId(String),
}

/// Stable machine-readable codes for error values.
pub trait ErrorCode: fmt::Display {
    fn error_code(&self) -> &'static str;

    fn retryable(&self) -> bool {
        false
    }
}

impl ErrorCode for ApiError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Request(_) => "E_API_REQUEST",
            Self::Status { .. } => "E_API_STATUS",
            Self::Decode(_) => "E_API_DECODE",
            Self::HttpClientBuild(_) => "E_HTTP_CLIENT_BUILD",
            Self::InvalidBaseUrl(_) => "E_API_BASE_URL",
            Self::InvalidId(_) => "E_API_INVALID_ID",
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, Self::Request(_) | Self::Status { status: 429 | 500..=599, .. })
    }
}

// =============================================================================
// CARD
// =============================================================================

/// Starred marker on a card. The service sends either a number or a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Starred {
    Number(f64),
    Text(String),
}

impl fmt::Display for Starred {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// A single card on a board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub starred: Option<Starred>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_list: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_board: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
    #[serde(default)]
    pub closed: bool,
}

impl Card {
    /// Build a bare card with only a name. Mostly useful for fixtures.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            starred: None,
            id_list: None,
            id_board: None,
            desc: None,
            closed: false,
        }
    }

    #[must_use]
    pub fn with_starred(mut self, starred: Starred) -> Self {
        self.starred = Some(starred);
        self
    }
}

// =============================================================================
// BOARD / LIST
// =============================================================================

/// An already-resolved board value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Board {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default)]
    pub closed: bool,
}

/// An already-resolved list value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct List {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_board: Option<String>,
    #[serde(default)]
    pub closed: bool,
}

/// Parse a card array response body.
///
/// # Errors
///
/// Returns [`ApiError::Decode`] if the body is not a JSON array of cards.
pub fn parse_cards(text: &str) -> Result<Vec<Card>, ApiError> {
    serde_json::from_str(text).map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
