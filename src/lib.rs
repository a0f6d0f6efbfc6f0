//! Card-list fetch core for a Trello-style task-board service.
//!
//! DESIGN
//! ======
//! A `Reference` (board or list, by id or by value) resolves to one remote
//! card query. A `CardSlot` runs at most one such query at a time, swallows
//! failures into an empty list, and hands results back to whichever task
//! owns the slot. `CardListController` wraps a slot with the title and item
//! state a card-list view needs.

pub mod api;
pub mod cell;
pub mod config;
pub mod controller;
pub mod diagnostics;
pub mod reference;
pub mod slot;
pub mod subscription;

#[cfg(test)]
mod test_helpers;

pub use api::CardQuery;
pub use api::http::TrelloClient;
pub use api::types::{ApiError, Board, Card, List, Starred};
pub use controller::CardListController;
pub use reference::Reference;
pub use slot::{CardSlot, Delivery, Outcome, SlotState};
pub use subscription::{SlotId, Subscription, SubscriptionSet};
