//! Wire types for the prediction service

use serde::{Deserialize, Serialize};

/// Masked text sent to the service: space-joined words with every redacted
/// position replaced by the mask token. Transports escape it themselves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnredactionRequest {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnredactionResponse {
    /// Echo of the request text
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub unredacted_text: String,
    /// One replacement per masked position, in request order
    pub unredacted_words: Vec<String>,
}

impl UnredactionResponse {
    pub fn with_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            text: String::new(),
            unredacted_text: String::new(),
            unredacted_words: words.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_response() {
        let raw = r#"{"text":"The unk fox","unredacted_text":"The quick fox","unredacted_words":["quick"]}"#;
        let response: UnredactionResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(response.text, "The unk fox");
        assert_eq!(response.unredacted_text, "The quick fox");
        assert_eq!(response.unredacted_words, vec!["quick"]);
    }

    #[test]
    fn parse_words_only() {
        let raw = r#"{"unredacted_words":["a","b"]}"#;
        let response: UnredactionResponse = serde_json::from_str(raw).unwrap();
        assert!(response.text.is_empty());
        assert_eq!(response.unredacted_words.len(), 2);
    }

    #[test]
    fn reject_missing_words() {
        let raw = r#"{"text":"The unk fox"}"#;
        assert!(serde_json::from_str::<UnredactionResponse>(raw).is_err());
    }
}
