//! Trello-style REST client.
//!
//! Thin HTTP wrapper over the card endpoints. Credentials ride along as
//! `key`/`token` query parameters. Body parsing is pure (`types::parse_cards`)
//! so it can be tested without a server.
//!
//! Ids are appended to the base URL as single percent-encoded path segments,
//! so `/`, `?` or `#` inside an id stay part of that id.

use std::time::Duration;

use reqwest::Url;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::CardQuery;
use super::types::{ApiError, Board, Card, List, parse_cards};
use crate::config::ApiConfig;

// =============================================================================
// CLIENT
// =============================================================================

pub struct TrelloClient {
    http: reqwest::Client,
    base_url: Url,
    api_key: String,
    token: String,
}

impl TrelloClient {
    /// Build a client from typed config.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidBaseUrl`] if the base URL does not parse or
    /// cannot take a path, and [`ApiError::HttpClientBuild`] if the HTTP
    /// client fails to build.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| ApiError::InvalidBaseUrl(format!("{}: {e}", config.base_url)))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidBaseUrl(config.base_url.clone()));
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| ApiError::HttpClientBuild(e.to_string()))?;
        Ok(Self {
            http,
            base_url,
            api_key: config.api_key.clone(),
            token: config.token.clone(),
        })
    }

    /// Fetch a single board by id.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport, status, or decode failure.
    pub async fn board(&self, board_id: &str) -> Result<Board, ApiError> {
        let text = self.get_text(&board_endpoint(board_id)).await?;
        parse_json(&text)
    }

    /// Fetch a single list by id.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport, status, or decode failure.
    pub async fn list(&self, list_id: &str) -> Result<List, ApiError> {
        let text = self.get_text(&list_endpoint(list_id)).await?;
        parse_json(&text)
    }

    async fn get_cards(&self, segments: &[&str]) -> Result<Vec<Card>, ApiError> {
        let text = self.get_text(segments).await?;
        parse_cards(&text)
    }

    async fn get_text(&self, segments: &[&str]) -> Result<String, ApiError> {
        let url = endpoint_url(&self.base_url, segments)?;
        debug!(path = url.path(), "api request");

        let response = self
            .http
            .get(url)
            .query(&[("key", self.api_key.as_str()), ("token", self.token.as_str())])
            .send()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;

        if !status.is_success() {
            return Err(ApiError::Status { status: status.as_u16(), body: text });
        }

        Ok(text)
    }
}

#[async_trait::async_trait]
impl CardQuery for TrelloClient {
    async fn cards_by_board_id(&self, board_id: &str) -> Result<Vec<Card>, ApiError> {
        self.get_cards(&board_cards_endpoint(board_id)).await
    }

    async fn cards_by_list_id(&self, list_id: &str) -> Result<Vec<Card>, ApiError> {
        self.get_cards(&list_cards_endpoint(list_id)).await
    }

    // The value already carries its id; the endpoint is the same one.
    async fn board_cards(&self, board: &Board) -> Result<Vec<Card>, ApiError> {
        self.get_cards(&board_cards_endpoint(&board.id)).await
    }

    async fn list_cards(&self, list: &List) -> Result<Vec<Card>, ApiError> {
        self.get_cards(&list_cards_endpoint(&list.id)).await
    }
}

// =============================================================================
// ENDPOINTS
// =============================================================================

fn board_endpoint(board_id: &str) -> [&str; 2] {
    ["boards", board_id]
}

fn list_endpoint(list_id: &str) -> [&str; 2] {
    ["lists", list_id]
}

fn board_cards_endpoint(board_id: &str) -> [&str; 3] {
    ["boards", board_id, "cards"]
}

fn list_cards_endpoint(list_id: &str) -> [&str; 3] {
    ["lists", list_id, "cards"]
}

/// Append `segments` to `base`, each as exactly one encoded path segment.
fn endpoint_url(base: &Url, segments: &[&str]) -> Result<Url, ApiError> {
    if let Some(bad) = segments.iter().find(|s| matches!(**s, "" | "." | "..")) {
        return Err(ApiError::InvalidId((*bad).to_string()));
    }
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| ApiError::InvalidBaseUrl(base.to_string()))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

fn parse_json<T: DeserializeOwned>(text: &str) -> Result<T, ApiError> {
    serde_json::from_str(text).map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(test)]
#[path = "http_test.rs"]
mod tests;
