//! Shared test doubles: a scripted `CardQuery` and a recording diagnostic sink.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::ThreadId;

use tokio::sync::{Notify, oneshot};

use crate::api::CardQuery;
use crate::api::types::{ApiError, Board, Card, List};
use crate::diagnostics::DiagnosticSink;
use crate::reference::Reference;

#[must_use]
pub fn board(id: &str, name: &str) -> Board {
    Board { id: id.into(), name: name.into(), desc: None, url: None, closed: false }
}

#[must_use]
pub fn list(id: &str, name: &str) -> List {
    List { id: id.into(), name: name.into(), id_board: None, closed: false }
}

// =============================================================================
// MockQuery
// =============================================================================

/// Which `CardQuery` operation was invoked, with the id it was given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    BoardId(String),
    Board(String),
    ListId(String),
    List(String),
}

#[derive(Clone)]
enum Scripted {
    Cards(Vec<Card>),
    Fail(String),
}

/// Scripted card query keyed by board/list id. Unscripted ids return `[]`.
#[derive(Default)]
pub struct MockQuery {
    calls: Mutex<Vec<Call>>,
    scripted: Mutex<HashMap<String, Scripted>>,
    gates: Mutex<HashMap<String, Arc<Notify>>>,
    off_thread: AtomicBool,
    fetch_threads: Mutex<Vec<ThreadId>>,
}

impl MockQuery {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, id: &str, cards: Vec<Card>) {
        self.scripted.lock().unwrap().insert(id.into(), Scripted::Cards(cards));
    }

    pub fn fail(&self, id: &str, message: &str) {
        self.scripted.lock().unwrap().insert(id.into(), Scripted::Fail(message.into()));
    }

    /// Hold fetches for `id` until the returned gate is notified.
    pub fn hold(&self, id: &str) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.gates.lock().unwrap().insert(id.into(), gate.clone());
        gate
    }

    /// Produce results on a separate OS thread.
    pub fn resolve_off_thread(&self) {
        self.off_thread.store(true, Ordering::SeqCst);
    }

    #[must_use]
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    #[must_use]
    pub fn fetch_threads(&self) -> Vec<ThreadId> {
        self.fetch_threads.lock().unwrap().clone()
    }

    async fn run(&self, call: Call, id: &str) -> Result<Vec<Card>, ApiError> {
        self.calls.lock().unwrap().push(call);

        let gate = self.gates.lock().unwrap().get(id).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        let scripted = self.scripted.lock().unwrap().get(id).cloned();
        let scripted = scripted.unwrap_or(Scripted::Cards(Vec::new()));

        if self.off_thread.load(Ordering::SeqCst) {
            let (tx, rx) = oneshot::channel();
            std::thread::spawn(move || {
                let _ = tx.send((std::thread::current().id(), scripted));
            });
            let (thread, scripted) = rx.await.unwrap();
            self.fetch_threads.lock().unwrap().push(thread);
            return into_result(scripted);
        }

        self.fetch_threads.lock().unwrap().push(std::thread::current().id());
        into_result(scripted)
    }
}

fn into_result(scripted: Scripted) -> Result<Vec<Card>, ApiError> {
    match scripted {
        Scripted::Cards(cards) => Ok(cards),
        Scripted::Fail(message) => Err(ApiError::Request(message)),
    }
}

#[async_trait::async_trait]
impl CardQuery for MockQuery {
    async fn cards_by_board_id(&self, board_id: &str) -> Result<Vec<Card>, ApiError> {
        self.run(Call::BoardId(board_id.into()), board_id).await
    }

    async fn cards_by_list_id(&self, list_id: &str) -> Result<Vec<Card>, ApiError> {
        self.run(Call::ListId(list_id.into()), list_id).await
    }

    async fn board_cards(&self, board: &Board) -> Result<Vec<Card>, ApiError> {
        self.run(Call::Board(board.id.clone()), &board.id).await
    }

    async fn list_cards(&self, list: &List) -> Result<Vec<Card>, ApiError> {
        self.run(Call::List(list.id.clone()), &list.id).await
    }
}

// =============================================================================
// RecordingSink
// =============================================================================

/// Diagnostic sink that keeps `(reference id, error message)` entries.
#[derive(Default)]
pub struct RecordingSink {
    entries: Mutex<Vec<(String, String)>>,
}

impl RecordingSink {
    #[must_use]
    pub fn entries(&self) -> Vec<(String, String)> {
        self.entries.lock().unwrap().clone()
    }
}

impl DiagnosticSink for RecordingSink {
    fn fetch_failed(&self, reference: &Reference, error: &ApiError) {
        self.entries.lock().unwrap().push((reference.id().to_string(), error.to_string()));
    }
}
