//! Card-list controller, the consumer side of a card slot.
//!
//! DESIGN
//! ======
//! The controller owns the presentation state (title + items) plus the slot
//! and the subscription set that keeps its fetch alive. Setting a mode
//! refetches and retitles; `appear` refetches the current mode. Deliveries
//! are applied only from `next_update`, so the task that drives the
//! controller is the one place items ever change.
//!
//! Dropping the controller drops its `SubscriptionSet`, which cancels any
//! outstanding fetch.

use std::sync::Arc;

use tracing::info;

use crate::api::CardQuery;
use crate::api::types::Card;
use crate::cell::{CardCell, cells};
use crate::diagnostics::DiagnosticSink;
use crate::reference::{FALLBACK_TITLE, Reference};
use crate::slot::{CardSlot, Delivery, SlotState};
use crate::subscription::SubscriptionSet;

pub struct CardListController<Q: CardQuery + ?Sized> {
    slot: CardSlot<Q>,
    subscriptions: SubscriptionSet,
    mode: Option<Reference>,
    title: String,
    items: Vec<Card>,
}

impl<Q: CardQuery + ?Sized + 'static> CardListController<Q> {
    #[must_use]
    pub fn new(query: Arc<Q>) -> Self {
        Self::from_slot(CardSlot::new(query))
    }

    #[must_use]
    pub fn with_diagnostics(query: Arc<Q>, diagnostics: Arc<dyn DiagnosticSink>) -> Self {
        Self::from_slot(CardSlot::with_diagnostics(query, diagnostics))
    }

    fn from_slot(slot: CardSlot<Q>) -> Self {
        Self {
            slot,
            subscriptions: SubscriptionSet::new(),
            mode: None,
            title: FALLBACK_TITLE.to_string(),
            items: Vec::new(),
        }
    }

    #[must_use]
    pub fn mode(&self) -> Option<&Reference> {
        self.mode.as_ref()
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn items(&self) -> &[Card] {
        &self.items
    }

    #[must_use]
    pub fn cells(&self) -> Vec<CardCell> {
        cells(&self.items)
    }

    #[must_use]
    pub fn state(&self) -> SlotState {
        self.slot.state()
    }

    /// Show `reference`: start its fetch and update the title.
    pub fn set_mode(&mut self, reference: Reference) {
        info!(kind = reference.kind(), id = reference.id(), "card list mode changed");
        self.slot.activate(&reference, &mut self.subscriptions);
        reference.title().clone_into(&mut self.title);
        self.mode = Some(reference);
    }

    /// The list is becoming visible again: refetch the current mode.
    pub fn appear(&mut self) {
        if let Some(reference) = &self.mode {
            self.slot.activate(reference, &mut self.subscriptions);
        }
    }

    /// Stop any in-flight fetch. Items already shown are kept.
    pub fn disappear(&mut self) {
        self.slot.cancel(&mut self.subscriptions);
    }

    /// Wait for the current fetch and apply it. A failed fetch clears the list.
    ///
    /// Returns `None` when no fetch is in flight.
    pub async fn next_update(&mut self) -> Option<&[Card]> {
        let delivery = self.slot.next_delivery().await?;
        self.apply(delivery);
        Some(self.items.as_slice())
    }

    fn apply(&mut self, delivery: Delivery) {
        self.items = delivery.cards;
    }
}

#[cfg(test)]
#[path = "controller_test.rs"]
mod tests;
