//! Card slot: one fetch-and-display target.
//!
//! DESIGN
//! ======
//! `activate` cancels the slot's previous subscription, bumps the slot
//! generation and spawns the resolved fetch on the runtime. The fetch task
//! sends its raw result over an unbounded channel; the owner receives it with
//! `next_delivery` on its own task, which is the delivery context.
//!
//! Two mechanisms keep a superseded fetch from delivering:
//! - the task races the fetch against its cancellation token, so a
//!   cancelled fetch never sends;
//! - `next_delivery` drops any result whose generation is not current,
//!   covering the window where a task sent just before it was cancelled.
//!
//! The slot keeps a clone of the live subscription's token. If the owner
//! drops its `SubscriptionSet` mid-fetch, the waiting owner sees the token
//! fire and the slot falls back to `Idle` instead of waiting forever.
//!
//! ERROR HANDLING
//! ==============
//! Fetch failures are reported to the `DiagnosticSink` and replaced with an
//! empty card list. The owner only ever sees `Outcome::FailedDelivered`.
//! Reporting happens on the owner's side after the generation check, so a
//! superseded failure is never reported.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use crate::api::CardQuery;
use crate::api::types::{ApiError, Card};
use crate::diagnostics::{DiagnosticSink, TracingSink};
use crate::reference::{Reference, resolve};
use crate::subscription::{SlotId, Subscription, SubscriptionSet};

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotState {
    Idle,
    Fetching,
    Delivered,
    FailedDelivered,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Delivered,
    FailedDelivered,
}

/// Result of one fetch, as handed to the slot owner.
#[derive(Debug, Clone, PartialEq)]
pub struct Delivery {
    pub slot: SlotId,
    pub generation: u64,
    pub outcome: Outcome,
    pub cards: Vec<Card>,
}

/// Raw fetch result, checked against the slot generation before it becomes
/// a `Delivery`.
struct Completion {
    generation: u64,
    reference: Reference,
    result: Result<Vec<Card>, ApiError>,
}

// =============================================================================
// SLOT
// =============================================================================

pub struct CardSlot<Q: CardQuery + ?Sized> {
    id: SlotId,
    query: Arc<Q>,
    diagnostics: Arc<dyn DiagnosticSink>,
    generation: u64,
    state: SlotState,
    live: Option<CancellationToken>,
    tx: mpsc::UnboundedSender<Completion>,
    rx: mpsc::UnboundedReceiver<Completion>,
}

impl<Q: CardQuery + ?Sized + 'static> CardSlot<Q> {
    #[must_use]
    pub fn new(query: Arc<Q>) -> Self {
        Self::with_diagnostics(query, Arc::new(TracingSink))
    }

    #[must_use]
    pub fn with_diagnostics(query: Arc<Q>, diagnostics: Arc<dyn DiagnosticSink>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { id: SlotId::new(), query, diagnostics, generation: 0, state: SlotState::Idle, live: None, tx, rx }
    }

    #[must_use]
    pub fn id(&self) -> SlotId {
        self.id
    }

    #[must_use]
    pub fn state(&self) -> SlotState {
        self.state
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Start fetching `reference`, replacing any fetch already in flight.
    ///
    /// Must be called from within a tokio runtime.
    pub fn activate(&mut self, reference: &Reference, subscriptions: &mut SubscriptionSet) {
        subscriptions.cancel(self.id);

        self.generation += 1;
        self.state = SlotState::Fetching;

        let token = CancellationToken::new();
        let task = tokio::spawn(fetch_task(
            self.generation,
            reference.clone(),
            self.query.clone(),
            token.clone(),
            self.tx.clone(),
        ));

        debug!(slot = %self.id, generation = self.generation, kind = reference.kind(), id = reference.id(), "fetch started");
        self.live = Some(token.clone());
        subscriptions.store(self.id, Subscription::new(token, task));
    }

    /// Cancel the in-flight fetch, if any, and return to `Idle`.
    pub fn cancel(&mut self, subscriptions: &mut SubscriptionSet) {
        subscriptions.cancel(self.id);
        self.release();
    }

    /// Wait for the current fetch to deliver. Stale results are skipped.
    ///
    /// Returns `None` at once when nothing is in flight (`Idle`, or the
    /// current fetch already delivered). Also returns `None`, leaving the
    /// slot `Idle`, if the fetch's subscription is cancelled elsewhere, for
    /// example by dropping the `SubscriptionSet` that held it.
    pub async fn next_delivery(&mut self) -> Option<Delivery> {
        while self.state == SlotState::Fetching {
            let live = self.live.clone()?;
            let completion = tokio::select! {
                biased;
                completion = self.rx.recv() => completion,
                () = live.cancelled() => None,
            };
            let Some(completion) = completion else {
                debug!(slot = %self.id, generation = self.generation, "subscription released before delivery");
                self.release();
                return None;
            };
            if let Some(delivery) = self.accept(completion) {
                return Some(delivery);
            }
        }
        None
    }

    /// Non-blocking variant of [`Self::next_delivery`].
    pub fn try_next_delivery(&mut self) -> Option<Delivery> {
        while self.state == SlotState::Fetching {
            let Ok(completion) = self.rx.try_recv() else {
                if self.live.as_ref().is_none_or(CancellationToken::is_cancelled) {
                    self.release();
                }
                return None;
            };
            if let Some(delivery) = self.accept(completion) {
                return Some(delivery);
            }
        }
        None
    }

    /// Forget the live fetch and invalidate anything already queued.
    fn release(&mut self) {
        self.live = None;
        self.generation += 1;
        self.state = SlotState::Idle;
    }

    fn accept(&mut self, completion: Completion) -> Option<Delivery> {
        if completion.generation != self.generation || self.state != SlotState::Fetching {
            trace!(slot = %self.id, stale = completion.generation, current = self.generation, "dropping stale result");
            return None;
        }
        let (outcome, cards) = match completion.result {
            Ok(cards) => (Outcome::Delivered, cards),
            Err(e) => {
                self.diagnostics.fetch_failed(&completion.reference, &e);
                (Outcome::FailedDelivered, Vec::new())
            }
        };
        self.live = None;
        self.state = match outcome {
            Outcome::Delivered => SlotState::Delivered,
            Outcome::FailedDelivered => SlotState::FailedDelivered,
        };
        Some(Delivery { slot: self.id, generation: completion.generation, outcome, cards })
    }
}

async fn fetch_task<Q: CardQuery + ?Sized>(
    generation: u64,
    reference: Reference,
    query: Arc<Q>,
    token: CancellationToken,
    tx: mpsc::UnboundedSender<Completion>,
) {
    let result = tokio::select! {
        () = token.cancelled() => return,
        result = resolve(&reference, query.as_ref()) => result,
    };

    if token.is_cancelled() {
        return;
    }

    // The receiver lives in the slot; a closed channel means the owner is gone.
    let _ = tx.send(Completion { generation, reference, result });
}

#[cfg(test)]
#[path = "slot_test.rs"]
mod tests;
