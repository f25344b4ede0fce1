//! Classified text: an ordered word sequence with per-word redaction state
//!
//! All character offsets are counted in Unicode scalar values (`char`s), and
//! every word is followed by exactly one separator except the last.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::{Deserialize, Serialize};

use crate::word::Word;

/// Default placeholder sent in place of a redacted word
pub const DEFAULT_MASK_TOKEN: &str = "unk";

/// Separator between words in every projection
pub const SEPARATOR: char = ' ';

/// RFC 3986 unreserved characters stay literal, everything else is escaped
const QUERY_ESCAPE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Split text on runs of spaces and newlines, dropping empty tokens
pub fn tokenize(text: &str) -> Vec<Word> {
    text.split([SEPARATOR, '\n'])
        .filter(|token| !token.is_empty())
        .map(Word::new)
        .collect()
}

/// Whether `text` tokenizes back to exactly itself as one word
pub fn is_single_word(text: &str) -> bool {
    !text.is_empty() && !text.contains([SEPARATOR, '\n'])
}

/// Location of a raw character offset inside the word sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextIndex<'a> {
    pub word_index: usize,
    /// Offset inside the word; equals the word length when the offset sits on the
    /// separator after it (or the very end of the text)
    pub index_in_word: usize,
    pub word: &'a Word,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedText {
    words: Vec<Word>,
}

impl ClassifiedText {
    pub fn new(text: &str) -> Self {
        Self {
            words: tokenize(text),
        }
    }

    pub fn from_words(words: Vec<Word>) -> Self {
        Self { words }
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn word(&self, index: usize) -> Option<&Word> {
        self.words.get(index)
    }

    pub fn word_mut(&mut self, index: usize) -> Option<&mut Word> {
        self.words.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub(crate) fn into_words(self) -> Vec<Word> {
        self.words
    }

    /// Indices of Redacted words, in document order
    pub fn redacted_indices(&self) -> Vec<usize> {
        self.words
            .iter()
            .enumerate()
            .filter(|(_, word)| word.is_redacted())
            .map(|(index, _)| index)
            .collect()
    }

    pub fn has_redactions(&self) -> bool {
        self.words.iter().any(Word::is_redacted)
    }

    /// Original text of every word, space-joined
    pub fn raw_text(&self) -> String {
        self.join(|word| word.text().to_string())
    }

    /// Text as shown to the user, with predictions in place of Unredacted words
    pub fn display_text(&self) -> String {
        self.join(|word| word.display_text().to_string())
    }

    /// Space-joined text with every Redacted word replaced by `mask_token`
    pub fn mask_token_text(&self, mask_token: &str) -> String {
        self.join(|word| {
            if word.is_redacted() {
                mask_token.to_string()
            } else {
                word.text().to_string()
            }
        })
    }

    /// Query-safe form of [`Self::mask_token_text`]: tokens percent-escaped and joined by `%20`
    pub fn url_text(&self, mask_token: &str) -> String {
        utf8_percent_encode(&self.mask_token_text(mask_token), QUERY_ESCAPE).to_string()
    }

    /// Rendered length: display widths plus one separator per word boundary
    pub fn display_length(&self) -> usize {
        let words: usize = self.words.iter().map(Word::display_len).sum();
        words + self.words.len().saturating_sub(1)
    }

    /// Raw length: original widths plus one separator per word boundary
    pub fn raw_length(&self) -> usize {
        let words: usize = self.words.iter().map(Word::raw_len).sum();
        words + self.words.len().saturating_sub(1)
    }

    /// `[start, end)` spans of each word in rendered coordinates, separators excluded
    pub fn display_spans(&self) -> Vec<(usize, usize)> {
        let mut spans = Vec::with_capacity(self.words.len());
        let mut start = 0;
        for word in &self.words {
            let end = start + word.display_len();
            spans.push((start, end));
            start = end + 1;
        }
        spans
    }

    /// Index of the word under a rendered character offset.
    ///
    /// The separator after a word belongs to that word, so a tap on the gap
    /// selects the word to its left. Offsets at or past the rendered length miss.
    pub fn word_index_for_character_index(&self, index: usize) -> Option<usize> {
        if index >= self.display_length() {
            return None;
        }
        let mut end = 0;
        for (word_index, word) in self.words.iter().enumerate() {
            end += word.display_len() + 1;
            if index < end {
                return Some(word_index);
            }
        }
        None
    }

    pub fn word_for_character_index(&self, index: usize) -> Option<&Word> {
        self.word_index_for_character_index(index)
            .map(|word_index| &self.words[word_index])
    }

    /// Locate a raw character offset for edit insertion.
    ///
    /// The offset equal to the raw length maps to the end of the last word.
    pub fn text_index(&self, index: usize) -> Option<TextIndex<'_>> {
        let mut start = 0;
        for (word_index, word) in self.words.iter().enumerate() {
            let len = word.raw_len();
            if index <= start + len {
                return Some(TextIndex {
                    word_index,
                    index_in_word: index - start,
                    word,
                });
            }
            start += len + 1;
        }
        None
    }

    fn join(&self, project: impl Fn(&Word) -> String) -> String {
        let mut joined = String::new();
        for (index, word) in self.words.iter().enumerate() {
            if index > 0 {
                joined.push(SEPARATOR);
            }
            joined.push_str(&project(word));
        }
        joined
    }
}
