//! Remote card-query service.
//!
//! DESIGN
//! ======
//! `CardQuery` is the seam between the fetch core and the task-board API.
//! The production implementation is `http::TrelloClient`; tests substitute
//! an in-memory mock. Value variants (`board_cards`, `list_cards`) take the
//! already-resolved object so implementations can skip an id lookup.

pub mod http;
pub mod types;

use types::{ApiError, Board, Card, List};

/// Provider-neutral async card queries. Enables mocking in tests.
#[async_trait::async_trait]
pub trait CardQuery: Send + Sync {
    /// List all cards on the board with the given id.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport, status, or decode failure.
    async fn cards_by_board_id(&self, board_id: &str) -> Result<Vec<Card>, ApiError>;

    /// List all cards in the list with the given id.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport, status, or decode failure.
    async fn cards_by_list_id(&self, list_id: &str) -> Result<Vec<Card>, ApiError>;

    /// List all cards on an already-resolved board.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport, status, or decode failure.
    async fn board_cards(&self, board: &Board) -> Result<Vec<Card>, ApiError>;

    /// List all cards in an already-resolved list.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport, status, or decode failure.
    async fn list_cards(&self, list: &List) -> Result<Vec<Card>, ApiError>;
}
