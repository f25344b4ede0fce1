//! Word domain model

use serde::{Deserialize, Serialize};

use crate::classified_text::is_single_word;

/// Display/processing state of a single word
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum RedactionState {
    NotRedacted,
    Redacted,
    /// Shown with a predicted replacement instead of the original text
    Unredacted { prediction: String },
}

impl RedactionState {
    pub fn is_redacted(&self) -> bool {
        matches!(self, RedactionState::Redacted)
    }

    pub fn is_unredacted(&self) -> bool {
        matches!(self, RedactionState::Unredacted { .. })
    }
}

/// A single whitespace-delimited token and its redaction status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    text: String,
    state: RedactionState,
    /// State before the last transition; one level of undo.
    previous_state: Option<RedactionState>,
}

impl Word {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            state: RedactionState::NotRedacted,
            previous_state: None,
        }
    }

    pub fn redacted(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            state: RedactionState::Redacted,
            previous_state: Some(RedactionState::NotRedacted),
        }
    }

    /// The literal token as typed
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn state(&self) -> &RedactionState {
        &self.state
    }

    pub fn previous_state(&self) -> Option<&RedactionState> {
        self.previous_state.as_ref()
    }

    /// Predicted replacement, present only while the word is Unredacted
    pub fn prediction(&self) -> Option<&str> {
        match &self.state {
            RedactionState::Unredacted { prediction } => Some(prediction),
            _ => None,
        }
    }

    pub fn is_redacted(&self) -> bool {
        self.state.is_redacted()
    }

    /// Text as currently shown: the prediction when Unredacted, otherwise the original.
    /// Redacted words are drawn as a block of the original's width.
    pub fn display_text(&self) -> &str {
        self.prediction().unwrap_or(&self.text)
    }

    /// Rendered width in characters
    pub fn display_len(&self) -> usize {
        self.display_text().chars().count()
    }

    /// Raw width in characters, ignoring any prediction
    pub fn raw_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Cycle the redaction state the way a tap does.
    ///
    /// - NotRedacted goes back to whatever it was before, or Redacted on first toggle.
    /// - Redacted and Unredacted both go to NotRedacted.
    ///
    /// Leaving Unredacted keeps the prediction inside `previous_state`, so a later
    /// toggle brings the same (possibly stale) prediction back.
    pub fn toggle_redaction(&mut self) {
        let next = match &self.state {
            RedactionState::NotRedacted => self
                .previous_state
                .take()
                .filter(|state| *state != RedactionState::NotRedacted)
                .unwrap_or(RedactionState::Redacted),
            RedactionState::Redacted | RedactionState::Unredacted { .. } => {
                RedactionState::NotRedacted
            }
        };
        self.previous_state = Some(std::mem::replace(&mut self.state, next));
    }

    /// Apply a prediction to a Redacted word.
    ///
    /// Returns false, leaving the word as it was, if the word was not Redacted
    /// or the prediction would not tokenize back to a single word.
    pub fn apply_prediction(&mut self, prediction: impl Into<String>) -> bool {
        let prediction = prediction.into();
        if !self.is_redacted() || !is_single_word(&prediction) {
            return false;
        }
        self.previous_state = Some(RedactionState::Redacted);
        self.state = RedactionState::Unredacted { prediction };
        true
    }

    /// Drop a prediction and return to Redacted. Returns false if the word was not Unredacted.
    pub fn revert_prediction(&mut self) -> bool {
        if !self.state.is_unredacted() {
            return false;
        }
        self.previous_state = Some(std::mem::replace(
            &mut self.state,
            RedactionState::Redacted,
        ));
        true
    }
}
