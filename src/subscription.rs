//! Scoped fetch subscriptions.
//!
//! DESIGN
//! ======
//! A `Subscription` pairs a cancellation token with the spawned task that
//! honours it. Dropping the handle cancels the token and aborts the task, so
//! a subscription can never outlive its owner. `SubscriptionSet` is the
//! owner-side container: one entry per slot, and inserting for a slot that
//! already has an entry cancels the old one first.

use std::collections::HashMap;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

/// Identity of a fetch-and-display slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId(Uuid);

impl SlotId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SlotId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SlotId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

// =============================================================================
// SUBSCRIPTION
// =============================================================================

pub struct Subscription {
    token: CancellationToken,
    task: JoinHandle<()>,
}

impl Subscription {
    #[must_use]
    pub fn new(token: CancellationToken, task: JoinHandle<()>) -> Self {
        Self { token, task }
    }

    pub fn cancel(&self) {
        self.token.cancel();
        self.task.abort();
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel();
    }
}

// =============================================================================
// SUBSCRIPTION SET
// =============================================================================

/// Owner-held subscriptions, at most one per slot.
#[derive(Default)]
pub struct SubscriptionSet {
    entries: HashMap<SlotId, Subscription>,
}

impl SubscriptionSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `subscription` for `slot`, cancelling whatever was there.
    pub fn store(&mut self, slot: SlotId, subscription: Subscription) {
        if let Some(previous) = self.entries.insert(slot, subscription) {
            previous.cancel();
        }
    }

    /// Cancel and drop the subscription for `slot`. Returns whether one existed.
    pub fn cancel(&mut self, slot: SlotId) -> bool {
        self.entries.remove(&slot).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
#[path = "subscription_test.rs"]
mod tests;
