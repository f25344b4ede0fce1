//! Editable document backed by a classified text
//!
//! Every mutation bumps `revision`. Unredaction is staged: a copy is taken by
//! [`Document::begin_unredaction`] and only swapped back in by
//! [`Document::finish_unredaction`] if nothing changed in between. At most one
//! staged copy exists per document.

use tracing::{debug, warn};
use uuid::Uuid;

use crate::classified_text::{ClassifiedText, SEPARATOR, tokenize};
use crate::error::{CoreError, Result};
use crate::render::RenderedText;
use crate::word::Word;

/// Working copy handed to the coordinator while a request is outstanding
#[derive(Debug, Clone)]
pub struct PendingUnredaction {
    revision: u64,
    snapshot: ClassifiedText,
}

impl PendingUnredaction {
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn snapshot(&self) -> &ClassifiedText {
        &self.snapshot
    }
}

#[derive(Debug, Clone)]
pub struct Document {
    id: Uuid,
    text: ClassifiedText,
    /// The user typed a separator after the last word that tokenizing dropped
    trailing_separator: bool,
    revision: u64,
    in_flight: Option<u64>,
}

impl Document {
    pub fn new(text: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: ClassifiedText::new(text),
            trailing_separator: false,
            revision: 0,
            in_flight: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn classified_text(&self) -> &ClassifiedText {
        &self.text
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn is_unredacting(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Replace the whole text. All redaction state is discarded.
    pub fn set_text(&mut self, text: &str) {
        self.text = ClassifiedText::new(text);
        self.trailing_separator = false;
        self.touch();
    }

    /// Rendered text as the user sees it, plus a pending trailing separator
    fn editing_text(&self) -> String {
        let mut text = self.text.display_text();
        if self.trailing_separator && !self.text.is_empty() {
            text.push(SEPARATOR);
        }
        text
    }

    /// Length of the editable text, in characters
    pub fn text_length(&self) -> usize {
        self.text.display_length() + usize::from(self.trailing_separator && !self.text.is_empty())
    }

    /// Splice `replacement` into `[location, location + length)` of the rendered
    /// text and retokenize. Returns the caret offset after the edit.
    ///
    /// Words that lie wholly outside the edited span, with at least one separator
    /// between them and the edit, keep their redaction state. Words touched by the
    /// edit come back NotRedacted, and an Unredacted word that is touched has its
    /// prediction baked in as literal text.
    pub fn change_text(&mut self, location: usize, length: usize, replacement: &str) -> usize {
        let editing: Vec<char> = self.editing_text().chars().collect();
        let start = location.min(editing.len());
        let end = location.saturating_add(length).min(editing.len());

        let mut spliced: String = editing[..start].iter().collect();
        spliced.push_str(replacement);
        spliced.extend(&editing[end..]);

        let spans = self.text.display_spans();
        let keep_before = spans.iter().take_while(|(_, e)| *e < start).count();
        let keep_after = spans.iter().rev().take_while(|(s, _)| *s > end).count();

        let mut words = tokenize(&spliced);
        let old_words = std::mem::take(&mut self.text).into_words();
        if words.len() >= keep_before + keep_after {
            carry_over(&mut words, &old_words, keep_before, keep_after);
        }

        debug!(
            document_id = %self.id,
            start,
            end,
            inserted = replacement.chars().count(),
            kept = keep_before + keep_after,
            words = words.len(),
            "changed text"
        );

        self.trailing_separator = !words.is_empty() && spliced.ends_with([SEPARATOR, '\n']);
        self.text = ClassifiedText::from_words(words);
        self.touch();

        (start + replacement.chars().count()).min(self.text_length())
    }

    pub fn remove_last_character(&mut self) -> usize {
        let len = self.text_length();
        if len == 0 {
            return 0;
        }
        self.change_text(len - 1, 1, "")
    }

    pub fn append_character(&mut self, c: char) -> usize {
        let len = self.text_length();
        self.change_text(len, 0, c.encode_utf8(&mut [0; 4]))
    }

    pub fn rendered_text(&self) -> RenderedText {
        RenderedText::from_classified(&self.text)
    }

    /// Toggle redaction on a word by position
    pub fn toggle_word(&mut self, word_index: usize) -> Result<()> {
        let len = self.text.len();
        let word = self
            .text
            .word_mut(word_index)
            .ok_or(CoreError::WordIndexOutOfRange {
                index: word_index,
                len,
            })?;
        word.toggle_redaction();
        self.touch();
        Ok(())
    }

    /// Toggle the word under a rendered character offset (a tap).
    /// Returns the index of the toggled word, or `None` on a miss.
    pub fn toggle_word_at(&mut self, char_index: usize) -> Option<usize> {
        let word_index = self.text.word_index_for_character_index(char_index)?;
        self.text.word_mut(word_index)?.toggle_redaction();
        self.touch();
        Some(word_index)
    }

    /// Put every Unredacted word back to Redacted. Returns how many changed.
    pub fn revert_unredaction(&mut self) -> usize {
        let mut reverted = 0;
        for index in 0..self.text.len() {
            if let Some(word) = self.text.word_mut(index) {
                if word.revert_prediction() {
                    reverted += 1;
                }
            }
        }
        if reverted > 0 {
            self.touch();
        }
        reverted
    }

    /// Stage a working copy for an unredaction request.
    ///
    /// Returns `Ok(None)` when there is nothing Redacted, and
    /// [`CoreError::UnredactionInFlight`] if a copy is already staged.
    pub fn begin_unredaction(&mut self) -> Result<Option<PendingUnredaction>> {
        if self.in_flight.is_some() {
            return Err(CoreError::UnredactionInFlight);
        }
        if !self.text.has_redactions() {
            return Ok(None);
        }
        self.in_flight = Some(self.revision);
        Ok(Some(PendingUnredaction {
            revision: self.revision,
            snapshot: self.text.clone(),
        }))
    }

    /// Commit the result of a staged request.
    ///
    /// The in-flight slot is released either way; the result is dropped with
    /// [`CoreError::DocumentChanged`] if the document was mutated meanwhile.
    pub fn finish_unredaction(&mut self, revision: u64, result: ClassifiedText) -> Result<()> {
        if self.in_flight != Some(revision) {
            return Err(CoreError::NoUnredactionInFlight(revision));
        }
        self.in_flight = None;
        if self.revision != revision {
            warn!(
                document_id = %self.id,
                snapshot = revision,
                current = self.revision,
                "discarding unredaction result for a stale snapshot"
            );
            return Err(CoreError::DocumentChanged {
                snapshot: revision,
                current: self.revision,
            });
        }
        self.text = result;
        self.touch();
        Ok(())
    }

    /// Release the in-flight slot without touching the text
    pub fn abandon_unredaction(&mut self, revision: u64) {
        if self.in_flight == Some(revision) {
            self.in_flight = None;
        }
    }

    fn touch(&mut self) {
        self.revision += 1;
    }
}

/// Restore untouched words from before an edit when their text survived retokenizing
fn carry_over(words: &mut [Word], old: &[Word], keep_before: usize, keep_after: usize) {
    for (new, old) in words.iter_mut().zip(old).take(keep_before) {
        if new.text() == old.display_text() {
            *new = old.clone();
        }
    }
    for (new, old) in words.iter_mut().rev().zip(old.iter().rev()).take(keep_after) {
        if new.text() == old.display_text() {
            *new = old.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::word::RedactionState;

    fn states(doc: &Document) -> Vec<RedactionState> {
        doc.classified_text()
            .words()
            .iter()
            .map(|w| w.state().clone())
            .collect()
    }

    #[test]
    fn test_set_text_resets_state() {
        let mut doc = Document::new("The quick fox");
        doc.toggle_word(1).unwrap();
        doc.set_text("A lazy dog");

        assert_eq!(doc.classified_text().raw_text(), "A lazy dog");
        assert!(!doc.classified_text().has_redactions());
    }

    #[test]
    fn test_insert() {
        let mut doc = Document::new("The fox");
        let caret = doc.change_text(4, 0, "quick ");

        assert_eq!(doc.classified_text().raw_text(), "The quick fox");
        assert_eq!(caret, 10);
    }

    #[test]
    fn test_delete() {
        let mut doc = Document::new("The quick fox");
        let caret = doc.change_text(3, 6, "");

        assert_eq!(doc.classified_text().raw_text(), "The fox");
        assert_eq!(caret, 3);
    }

    #[test]
    fn test_replace() {
        let mut doc = Document::new("The quick fox");
        let caret = doc.change_text(4, 5, "slow");

        assert_eq!(doc.classified_text().raw_text(), "The slow fox");
        assert_eq!(caret, 8);
    }

    #[test]
    fn test_out_of_bounds_range_is_clamped() {
        let mut doc = Document::new("abc");
        let caret = doc.change_text(10, 5, "d");

        assert_eq!(doc.classified_text().raw_text(), "abcd");
        assert_eq!(caret, 4);
    }

    #[test]
    fn test_edit_keeps_redaction_outside_span() {
        let mut doc = Document::new("one two three four");
        doc.toggle_word(0).unwrap();
        doc.toggle_word(3).unwrap();

        // "one two three four" -> "one 2 three four"
        doc.change_text(4, 3, "2");

        assert_eq!(doc.classified_text().raw_text(), "one 2 three four");
        assert_eq!(
            states(&doc),
            vec![
                RedactionState::Redacted,
                RedactionState::NotRedacted,
                RedactionState::NotRedacted,
                RedactionState::Redacted,
            ]
        );
    }

    #[test]
    fn test_edit_touching_word_resets_it() {
        let mut doc = Document::new("one two");
        doc.toggle_word(1).unwrap();

        doc.change_text(7, 0, "s");

        assert_eq!(doc.classified_text().raw_text(), "one twos");
        assert_eq!(doc.classified_text().word(1).unwrap().state(), &RedactionState::NotRedacted);
    }

    #[test]
    fn test_edit_preserves_prediction_of_untouched_word() {
        let mut doc = Document::new("The quick fox");
        doc.toggle_word(1).unwrap();
        let mut staged = doc.begin_unredaction().unwrap().unwrap();
        staged.snapshot.word_mut(1).unwrap().apply_prediction("sly");
        doc.finish_unredaction(staged.revision(), staged.snapshot).unwrap();

        // "The sly fox" -> "The sly foxes"
        doc.change_text(11, 0, "es");

        let word = doc.classified_text().word(1).unwrap();
        assert_eq!(word.text(), "quick");
        assert_eq!(word.prediction(), Some("sly"));
        assert_eq!(doc.classified_text().display_text(), "The sly foxes");
    }

    #[test]
    fn test_typing_character_by_character() {
        let mut doc = Document::new("");
        for c in "hi there".chars() {
            doc.append_character(c);
        }
        assert_eq!(doc.classified_text().raw_text(), "hi there");
        assert_eq!(doc.classified_text().len(), 2);

        let caret = doc.remove_last_character();
        assert_eq!(doc.classified_text().raw_text(), "hi ther");
        assert_eq!(caret, 7);
    }

    #[test]
    fn test_remove_last_character_on_empty() {
        let mut doc = Document::new("");
        assert_eq!(doc.remove_last_character(), 0);
        assert!(doc.classified_text().is_empty());
    }

    #[test]
    fn test_toggle_word_at() {
        let mut doc = Document::new("The quick fox");
        assert_eq!(doc.toggle_word_at(5), Some(1));
        assert!(doc.classified_text().word(1).unwrap().is_redacted());
        assert_eq!(doc.toggle_word_at(99), None);
    }

    #[test]
    fn test_toggle_word_out_of_range() {
        let mut doc = Document::new("one");
        assert_eq!(
            doc.toggle_word(3),
            Err(CoreError::WordIndexOutOfRange { index: 3, len: 1 })
        );
    }

    #[test]
    fn test_begin_without_redactions_is_noop() {
        let mut doc = Document::new("nothing hidden");
        assert!(doc.begin_unredaction().unwrap().is_none());
        assert!(!doc.is_unredacting());
    }

    #[test]
    fn test_single_flight() {
        let mut doc = Document::new("The quick fox");
        doc.toggle_word(1).unwrap();

        let staged = doc.begin_unredaction().unwrap().unwrap();
        assert!(doc.is_unredacting());
        assert_eq!(doc.begin_unredaction().unwrap_err(), CoreError::UnredactionInFlight);

        doc.abandon_unredaction(staged.revision());
        assert!(!doc.is_unredacting());
        assert!(doc.begin_unredaction().unwrap().is_some());
    }

    #[test]
    fn test_stale_commit_is_discarded() {
        let mut doc = Document::new("The quick fox");
        doc.toggle_word(1).unwrap();

        let mut staged = doc.begin_unredaction().unwrap().unwrap();
        staged.snapshot.word_mut(1).unwrap().apply_prediction("sly");

        doc.append_character('!');
        let err = doc
            .finish_unredaction(staged.revision(), staged.snapshot)
            .unwrap_err();

        assert!(matches!(err, CoreError::DocumentChanged { .. }));
        assert!(!doc.is_unredacting());
        assert!(doc.classified_text().words().iter().all(|word| word.prediction().is_none()));
    }

    #[test]
    fn test_revert_unredaction() {
        let mut doc = Document::new("The quick fox");
        doc.toggle_word(1).unwrap();
        let mut staged = doc.begin_unredaction().unwrap().unwrap();
        staged.snapshot.word_mut(1).unwrap().apply_prediction("sly");
        doc.finish_unredaction(staged.revision(), staged.snapshot).unwrap();

        assert_eq!(doc.revert_unredaction(), 1);
        assert!(doc.classified_text().word(1).unwrap().is_redacted());
        assert_eq!(doc.revert_unredaction(), 0);
    }

    #[test]
    fn test_rendered_text() {
        let mut doc = Document::new("The quick fox");
        doc.toggle_word(1).unwrap();
        assert_eq!(doc.rendered_text().to_plain_string('*'), "The ***** fox");
    }
}
