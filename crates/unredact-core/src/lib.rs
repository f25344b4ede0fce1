//! Core redaction model for unredact
//!
//! This crate contains:
//! - Word model (tri-state redaction with one level of undo)
//! - Classified text (tokenizing, projections, offset-to-word mapping)
//! - Document (editing, rendering, staged unredaction with a single-flight guard)

pub mod classified_text;
pub mod document;
pub mod error;
pub mod render;
pub mod word;

pub use classified_text::{
    ClassifiedText, DEFAULT_MASK_TOKEN, SEPARATOR, TextIndex, is_single_word, tokenize,
};
pub use document::{Document, PendingUnredaction};
pub use error::{CoreError, Result};
pub use render::{DEFAULT_MASK_GLYPH, RenderedSpan, RenderedText, SpanKind};
pub use word::{RedactionState, Word};
