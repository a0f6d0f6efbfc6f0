//! Card-list references and fetch resolution.
//!
//! DESIGN
//! ======
//! A `Reference` names what a card list shows: a board or a list, either by
//! id or as an already-resolved value. `resolve` picks the matching
//! `CardQuery` operation. Resolution itself never fails; errors only come
//! out of the returned future.

use futures::future::BoxFuture;

use crate::api::CardQuery;
use crate::api::types::{ApiError, Board, Card, List};

/// Title shown when the reference carries no name.
pub const FALLBACK_TITLE: &str = "Cards";

#[derive(Debug, Clone, PartialEq)]
pub enum Reference {
    BoardId(String),
    Board(Board),
    ListId(String),
    List(List),
}

impl Reference {
    /// Short variant name for logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::BoardId(_) => "board_id",
            Self::Board(_) => "board",
            Self::ListId(_) => "list_id",
            Self::List(_) => "list",
        }
    }

    /// Id of the referenced board or list.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::BoardId(id) | Self::ListId(id) => id,
            Self::Board(board) => &board.id,
            Self::List(list) => &list.id,
        }
    }

    /// Display title: the value's name, or [`FALLBACK_TITLE`] for id references.
    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            Self::Board(board) => &board.name,
            Self::List(list) => &list.name,
            Self::BoardId(_) | Self::ListId(_) => FALLBACK_TITLE,
        }
    }
}

/// Select the card query for a reference.
pub fn resolve<'a, Q>(reference: &'a Reference, query: &'a Q) -> BoxFuture<'a, Result<Vec<Card>, ApiError>>
where
    Q: CardQuery + ?Sized,
{
    match reference {
        Reference::BoardId(id) => query.cards_by_board_id(id),
        Reference::Board(board) => query.board_cards(board),
        Reference::ListId(id) => query.cards_by_list_id(id),
        Reference::List(list) => query.list_cards(list),
    }
}

#[cfg(test)]
#[path = "reference_test.rs"]
mod tests;
