//! Render-ready view of a classified text
//!
//! The UI layer maps each span kind to its own styling: masked spans become
//! opaque bars, highlighted spans get the prediction colour.

use serde::{Deserialize, Serialize};

use crate::classified_text::{ClassifiedText, SEPARATOR};
use crate::word::RedactionState;

/// Glyph used when flattening masked spans to a plain string
pub const DEFAULT_MASK_GLYPH: char = '█';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpanKind {
    Plain,
    /// Opaque block standing in for a Redacted word
    Masked,
    /// Prediction for an Unredacted word
    Highlighted,
    Separator,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedSpan {
    pub kind: SpanKind,
    /// For masked spans this is the hidden original; never show it directly.
    pub text: String,
}

impl RenderedSpan {
    /// Width in characters
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedText {
    pub spans: Vec<RenderedSpan>,
}

impl RenderedText {
    /// Build spans for every word in order, single separators between them
    pub fn from_classified(text: &ClassifiedText) -> Self {
        let mut spans = Vec::with_capacity(text.len() * 2);
        for word in text.words() {
            spans.push(RenderedSpan {
                kind: SpanKind::Separator,
                text: SEPARATOR.to_string(),
            });
            let span = match word.state() {
                RedactionState::NotRedacted => RenderedSpan {
                    kind: SpanKind::Plain,
                    text: word.text().to_string(),
                },
                RedactionState::Redacted => RenderedSpan {
                    kind: SpanKind::Masked,
                    text: word.text().to_string(),
                },
                RedactionState::Unredacted { prediction } => RenderedSpan {
                    kind: SpanKind::Highlighted,
                    text: prediction.clone(),
                },
            };
            spans.push(span);
        }
        // leading separator
        if !spans.is_empty() {
            spans.remove(0);
        }
        Self { spans }
    }

    pub fn len(&self) -> usize {
        self.spans.iter().map(RenderedSpan::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Flatten to a string, drawing masked spans as `glyph` repeated to the hidden width
    pub fn to_plain_string(&self, glyph: char) -> String {
        self.spans
            .iter()
            .map(|span| match span.kind {
                SpanKind::Masked => std::iter::repeat_n(glyph, span.len()).collect(),
                _ => span.text.clone(),
            })
            .collect()
    }

    /// Flatten with custom decoration per kind (e.g. terminal highlighting)
    pub fn to_decorated_string(&self, decorate: impl Fn(SpanKind, &str) -> String) -> String {
        self.spans
            .iter()
            .map(|span| decorate(span.kind, &span.text))
            .collect()
    }
}
