//! Diagnostic sink for swallowed fetch failures.
//!
//! Fetch errors never reach the card list; they are reported here instead.
//! The default sink writes a structured `tracing` warning.

use tracing::warn;

use crate::api::types::{ApiError, ErrorCode};
use crate::reference::Reference;

pub trait DiagnosticSink: Send + Sync {
    /// Called once per failed fetch, on the slot owner's task, after the
    /// result has been checked against the slot's current generation.
    /// Failures of superseded or cancelled fetches are never reported.
    fn fetch_failed(&self, reference: &Reference, error: &ApiError);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn fetch_failed(&self, reference: &Reference, error: &ApiError) {
        warn!(
            error = %error,
            code = error.error_code(),
            retryable = error.retryable(),
            kind = reference.kind(),
            id = reference.id(),
            "card fetch failed; delivering empty list"
        );
    }
}
