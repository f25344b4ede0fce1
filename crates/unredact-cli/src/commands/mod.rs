pub mod config;
pub mod predict;
pub mod render;

use anyhow::{Result, bail};
use unredact_core::{Document, RenderedText, SpanKind};

use crate::cli::DocumentArgs;

/// Build a document and apply the requested toggles, word positions first
pub fn build_document(args: &DocumentArgs) -> Result<Document> {
    let mut document = Document::new(&args.text);
    for &index in &args.redact {
        document.toggle_word(index)?;
    }
    for &offset in &args.tap {
        if document.toggle_word_at(offset).is_none() {
            bail!(
                "offset {} is outside the text ({} characters)",
                offset,
                document.text_length()
            );
        }
    }
    Ok(document)
}

/// Masked words as glyph runs, predictions in brackets
pub fn format_rendered(rendered: &RenderedText, glyph: char) -> String {
    rendered.to_decorated_string(|kind, text| match kind {
        SpanKind::Masked => std::iter::repeat_n(glyph, text.chars().count()).collect(),
        SpanKind::Highlighted => format!("[{}]", text),
        SpanKind::Plain | SpanKind::Separator => text.to_string(),
    })
}
