//! Shared document handle for UI layers that edit while a request is running

use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, warn};
use unredact_core::Document;

use crate::error::UnredactionError;
use crate::unredactor::{UnredactionOutcome, Unredactor, commit};

/// What a session-level unredaction did to the live document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnredactionReport {
    pub applied: usize,
    pub error: Option<UnredactionError>,
}

#[derive(Clone)]
pub struct DocumentSession {
    document: Arc<Mutex<Document>>,
    unredactor: Arc<Unredactor>,
}

impl DocumentSession {
    pub fn new(document: Document, unredactor: Arc<Unredactor>) -> Self {
        Self {
            document: Arc::new(Mutex::new(document)),
            unredactor,
        }
    }

    /// Lock the document for editing. Do not hold the guard across [`Self::unredact`].
    pub async fn document(&self) -> MutexGuard<'_, Document> {
        self.document.lock().await
    }

    /// Unredact the live document.
    ///
    /// The lock is only held while staging and committing, so edits can continue
    /// during the request; if they do, the result is discarded. A second call
    /// while one is outstanding fails with [`UnredactionError::AlreadyInFlight`]
    /// without contacting the service. Dropping the returned future before it
    /// completes releases the slot.
    pub async fn unredact(&self) -> UnredactionReport {
        let pending = {
            let mut document = self.document.lock().await;
            match document.begin_unredaction() {
                Ok(Some(pending)) => pending,
                Ok(None) => {
                    return UnredactionReport {
                        applied: 0,
                        error: None,
                    };
                }
                Err(_) => {
                    debug!(document_id = %document.id(), "unredaction already in flight");
                    return UnredactionReport {
                        applied: 0,
                        error: Some(UnredactionError::AlreadyInFlight),
                    };
                }
            }
        };

        let mut slot = SharedSlot {
            document: Arc::clone(&self.document),
            revision: pending.revision(),
            armed: true,
        };
        let outcome = self.unredactor.unredact(pending.snapshot()).await;

        let mut document = self.document.lock().await;
        slot.armed = false;
        let UnredactionOutcome { applied, error, .. } =
            commit(&mut document, pending.revision(), outcome);
        UnredactionReport { applied, error }
    }
}

/// Releases the in-flight slot of a shared document when a request is cancelled
struct SharedSlot {
    document: Arc<Mutex<Document>>,
    revision: u64,
    armed: bool,
}

impl Drop for SharedSlot {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let revision = self.revision;
        if let Ok(mut document) = self.document.try_lock() {
            debug!(document_id = %document.id(), "unredaction cancelled, releasing slot");
            document.abandon_unredaction(revision);
            return;
        }

        // Someone is editing; release once they let go
        let document = Arc::clone(&self.document);
        match Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    document.lock().await.abandon_unredaction(revision);
                });
            }
            Err(_) => warn!(
                revision,
                "unredaction cancelled outside a runtime, slot not released"
            ),
        }
    }
}
