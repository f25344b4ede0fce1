//! Unredaction coordinator
//!
//! Stateless per call: each invocation stages a copy of the input, asks the
//! prediction service to fill the masked positions, and writes the answers
//! back into the copy. The input is never mutated.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;
use tracing::{debug, info, warn};
use unredact_client::{UnredactionClient, UnredactionRequest};
use unredact_core::{ClassifiedText, DEFAULT_MASK_TOKEN, Document, is_single_word};

use crate::error::UnredactionError;

#[derive(Debug, Clone)]
pub struct UnredactorConfig {
    /// Placeholder sent in place of each redacted word
    pub mask_token: String,
    /// Upper bound on a single service call
    pub request_timeout: Duration,
}

impl Default for UnredactorConfig {
    fn default() -> Self {
        Self {
            mask_token: DEFAULT_MASK_TOKEN.to_string(),
            request_timeout: Duration::from_secs(10),
        }
    }
}

/// Result of one round trip: the (possibly partially) updated copy and any failure
#[derive(Debug, Clone)]
pub struct UnredactionOutcome {
    pub text: ClassifiedText,
    /// Number of words that received a prediction
    pub applied: usize,
    pub error: Option<UnredactionError>,
}

impl UnredactionOutcome {
    fn unchanged(text: ClassifiedText, error: Option<UnredactionError>) -> Self {
        Self {
            text,
            applied: 0,
            error,
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(ToString::to_string)
    }
}

pub struct Unredactor {
    client: Arc<dyn UnredactionClient>,
    config: UnredactorConfig,
}

impl Unredactor {
    pub fn new(client: Arc<dyn UnredactionClient>, config: UnredactorConfig) -> Self {
        Self { client, config }
    }

    /// Request predictions for every Redacted word in `text`.
    ///
    /// With nothing Redacted the service is not called and an unchanged copy
    /// comes back without error. Replacements are assigned by position: the
    /// Nth Redacted word in document order receives the Nth returned word.
    /// A returned word that is empty or contains a separator is not applied
    /// and the round trip reports a malformed response.
    pub async fn unredact(&self, text: &ClassifiedText) -> UnredactionOutcome {
        let redacted = text.redacted_indices();
        if redacted.is_empty() {
            debug!("nothing redacted, skipping prediction request");
            return UnredactionOutcome::unchanged(text.clone(), None);
        }

        let mut working = text.clone();
        let request = UnredactionRequest {
            text: working.mask_token_text(&self.config.mask_token),
        };
        debug!(payload = %request.text, masked = redacted.len(), "sending unredaction request");

        let response = match timeout(self.config.request_timeout, self.client.unredact(&request)).await
        {
            Ok(Ok(response)) => response,
            Ok(Err(error)) => {
                warn!("unredaction request failed: {error}");
                return UnredactionOutcome::unchanged(working, Some(error.into()));
            }
            Err(_) => {
                warn!(
                    timeout_ms = self.config.request_timeout.as_millis() as u64,
                    "unredaction request timed out"
                );
                return UnredactionOutcome::unchanged(
                    working,
                    Some(UnredactionError::Timeout(self.config.request_timeout)),
                );
            }
        };

        let predictions = &response.unredacted_words;
        let mut applied = 0;
        let mut rejected = 0;
        for (&index, prediction) in redacted.iter().zip(predictions) {
            if !is_single_word(prediction) {
                warn!(
                    word_index = index,
                    prediction = %prediction,
                    "rejecting prediction that is not a single word"
                );
                rejected += 1;
                continue;
            }
            if let Some(word) = working.word_mut(index) {
                if word.apply_prediction(prediction.as_str()) {
                    applied += 1;
                }
            }
        }

        let error = if predictions.len() < redacted.len() {
            warn!(
                expected = redacted.len(),
                received = predictions.len(),
                "prediction service returned too few words"
            );
            Some(UnredactionError::ReconciliationMismatch {
                expected: redacted.len(),
                received: predictions.len(),
            })
        } else if rejected > 0 {
            Some(UnredactionError::MalformedResponse(format!(
                "{} predicted word(s) were empty or contained whitespace",
                rejected
            )))
        } else {
            if predictions.len() > redacted.len() {
                debug!(
                    extra = predictions.len() - redacted.len(),
                    "ignoring surplus predicted words"
                );
            }
            None
        };

        info!(applied, masked = redacted.len(), "applied predictions");
        UnredactionOutcome {
            text: working,
            applied,
            error,
        }
    }

    /// Run a full round trip against an exclusively borrowed document and commit the result.
    pub async fn unredact_document(&self, document: &mut Document) -> UnredactionOutcome {
        let pending = match document.begin_unredaction() {
            Ok(Some(pending)) => pending,
            Ok(None) => {
                return UnredactionOutcome::unchanged(document.classified_text().clone(), None);
            }
            Err(_) => {
                return UnredactionOutcome::unchanged(
                    document.classified_text().clone(),
                    Some(UnredactionError::AlreadyInFlight),
                );
            }
        };

        let slot = BorrowedSlot {
            revision: pending.revision(),
            document,
            armed: true,
        };
        let outcome = self.unredact(pending.snapshot()).await;
        slot.commit(outcome)
    }
}

/// Releases a document's in-flight slot if the request future is dropped before committing
struct BorrowedSlot<'a> {
    document: &'a mut Document,
    revision: u64,
    armed: bool,
}

impl BorrowedSlot<'_> {
    fn commit(mut self, outcome: UnredactionOutcome) -> UnredactionOutcome {
        self.armed = false;
        commit(&mut *self.document, self.revision, outcome)
    }
}

impl Drop for BorrowedSlot<'_> {
    fn drop(&mut self) {
        if self.armed {
            debug!(document_id = %self.document.id(), "unredaction cancelled, releasing slot");
            self.document.abandon_unredaction(self.revision);
        }
    }
}

/// Swap a finished outcome into the document, or release the slot if nothing changed
pub(crate) fn commit(
    document: &mut Document,
    revision: u64,
    outcome: UnredactionOutcome,
) -> UnredactionOutcome {
    if outcome.applied == 0 {
        document.abandon_unredaction(revision);
        return outcome;
    }
    match document.finish_unredaction(revision, outcome.text.clone()) {
        Ok(()) => outcome,
        Err(_) => UnredactionOutcome::unchanged(
            document.classified_text().clone(),
            Some(UnredactionError::DocumentChanged),
        ),
    }
}
