//! In-flight request bookkeeping.
//!
//! Every lookup and registration happens under one synchronous lock, so the
//! check-then-register sequence has no suspension point in between.

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use futures_util::future::{BoxFuture, FutureExt, Shared};
use ownlib_logging::ownlib_debug;
use serde_json::Value;

use crate::{ApiError, RequestKey};

/// Not-yet-settled result of an issued network operation. Cloning it yields
/// another waiter on the same operation.
pub type PendingOutcome = Shared<BoxFuture<'static, Result<Value, ApiError>>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

struct Entry {
    ticket: Ticket,
    outcome: PendingOutcome,
}

#[derive(Default)]
struct RegistryInner {
    entries: Mutex<HashMap<RequestKey, Entry>>,
    next_ticket: AtomicU64,
}

/// Map from request key to the pending outcome of that request.
#[derive(Clone, Default)]
pub struct InFlightRegistry {
    inner: Arc<RegistryInner>,
}

/// What happened when a caller asked for a keyed operation.
pub enum Claim {
    /// An operation with this key was already pending; the caller shares it.
    Joined(PendingOutcome),
    /// A new operation was started and registered.
    Started(PendingOutcome),
}

impl Claim {
    pub fn into_outcome(self) -> PendingOutcome {
        match self {
            Claim::Joined(outcome) | Claim::Started(outcome) => outcome,
        }
    }
}

impl InFlightRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the pending outcome for `key`, or starts `operation` and
    /// registers it. The operation is spawned so that it settles, and
    /// releases its entry, even if every waiter is dropped.
    pub fn share_or_start<F>(&self, key: RequestKey, operation: F) -> Claim
    where
        F: Future<Output = Result<Value, ApiError>> + Send + 'static,
    {
        let mut entries = self.lock();
        if let Some(entry) = entries.get(&key) {
            ownlib_debug!("Joining pending request {}", key);
            return Claim::Joined(entry.outcome.clone());
        }
        let outcome = self.register(&mut entries, key, operation);
        Claim::Started(outcome)
    }

    /// Starts `operation` only if nothing with `key` is pending. Returns
    /// `None`, without touching the registry, when a match is pending.
    pub fn start_exclusive<F>(&self, key: RequestKey, operation: F) -> Option<PendingOutcome>
    where
        F: Future<Output = Result<Value, ApiError>> + Send + 'static,
    {
        let mut entries = self.lock();
        if entries.contains_key(&key) {
            ownlib_debug!("Rejecting duplicate request {}", key);
            return None;
        }
        Some(self.register(&mut entries, key, operation))
    }

    pub fn contains(&self, key: &RequestKey) -> bool {
        self.lock().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Drops all bookkeeping. Running operations are not cancelled.
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn register<F>(
        &self,
        entries: &mut HashMap<RequestKey, Entry>,
        key: RequestKey,
        operation: F,
    ) -> PendingOutcome
    where
        F: Future<Output = Result<Value, ApiError>> + Send + 'static,
    {
        let ticket = Ticket(self.inner.next_ticket.fetch_add(1, Ordering::Relaxed));
        let registry = self.clone();
        let release_key = key.clone();
        // The spawned task cannot release before we insert: it must take the
        // same lock, which the caller holds until this function returns.
        let handle = tokio::spawn(async move {
            let result = operation.await;
            registry.release(&release_key, ticket);
            result
        });
        let outcome = async move {
            handle
                .await
                .unwrap_or_else(|err| Err(ApiError::transport(err.to_string())))
        }
        .boxed()
        .shared();
        entries.insert(
            key,
            Entry {
                ticket,
                outcome: outcome.clone(),
            },
        );
        outcome
    }

    fn release(&self, key: &RequestKey, ticket: Ticket) {
        let mut entries = self.lock();
        if entries.get(key).map(|entry| entry.ticket) == Some(ticket) {
            entries.remove(key);
            ownlib_debug!("Released {}", key);
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<RequestKey, Entry>> {
        // A poisoned map only holds handles; keep using it.
        self.inner
            .entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
