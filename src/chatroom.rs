//! The ordered message sink produced by an import.
//!
//! A [`Chatroom`] collects the `(timestamp, sender, content)` triples the
//! parse engines emit, in file scan order. The engines only ever call
//! [`Chatroom::append`]; they never read the collection back.
//!
//! On every append the content is run through the injected word tokenizer
//! (whitespace split by default) and a word-frequency table is maintained,
//! which is what downstream analysis consumes.

use std::collections::HashMap;

use chrono::NaiveDateTime;
use regex::Regex;

use crate::Message;
use crate::config::LineAnalyzer;

/// Header pattern of one-to-one and group chat exports:
/// `"<name> 님과 카카오톡 대화"` / `"<name> <N> 카카오톡 대화"`.
const HEADER_PATTERN: &str = r"(.+?) 님과 카카오톡 대화|(.+?) \d+ 카카오톡 대화";

/// An ordered collection of parsed messages for one chat room.
pub struct Chatroom {
    name: String,
    messages: Vec<Message>,
    analyzer: Option<LineAnalyzer>,
    word_counts: HashMap<String, usize>,
}

impl Chatroom {
    /// Creates an empty chatroom with the default whitespace tokenizer.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            messages: Vec::new(),
            analyzer: None,
            word_counts: HashMap::new(),
        }
    }

    /// Creates an empty chatroom with a custom word tokenizer.
    ///
    /// # Example
    ///
    /// ```
    /// use std::sync::Arc;
    /// use kakaopack::Chatroom;
    ///
    /// let room = Chatroom::with_analyzer(
    ///     "study group",
    ///     Arc::new(|content: &str| {
    ///         content.split(',').map(str::trim).map(String::from).collect()
    ///     }),
    /// );
    /// assert_eq!(room.name(), "study group");
    /// ```
    pub fn with_analyzer(name: impl Into<String>, analyzer: LineAnalyzer) -> Self {
        Self {
            analyzer: Some(analyzer),
            ..Self::new(name)
        }
    }

    /// Appends a message in scan order and folds its tokens into the
    /// word-frequency table.
    pub fn append(
        &mut self,
        timestamp: NaiveDateTime,
        sender: impl Into<String>,
        content: impl Into<String>,
    ) {
        let msg = Message::new(timestamp, sender, content);
        for token in self.tokenize(&msg.content) {
            *self.word_counts.entry(token).or_insert(0) += 1;
        }
        self.messages.push(msg);
    }

    fn tokenize(&self, content: &str) -> Vec<String> {
        match &self.analyzer {
            Some(analyze) => analyze(content),
            None => content.split_whitespace().map(String::from).collect(),
        }
    }

    /// Returns the chat room display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Replaces the display name (e.g. a CLI `--name` override).
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Returns the messages in scan order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Number of messages collected.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Returns `true` if no messages were collected.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Word frequencies accumulated over all appended messages.
    pub fn word_counts(&self) -> &HashMap<String, usize> {
        &self.word_counts
    }

    /// The `n` most frequent words, most frequent first. Ties break by word
    /// for deterministic output.
    pub fn top_words(&self, n: usize) -> Vec<(&str, usize)> {
        let mut entries: Vec<(&str, usize)> = self
            .word_counts
            .iter()
            .map(|(word, count)| (word.as_str(), *count))
            .collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries.truncate(n);
        entries
    }
}

impl std::fmt::Debug for Chatroom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Chatroom")
            .field("name", &self.name)
            .field("messages", &self.messages.len())
            .field("words", &self.word_counts.len())
            .field("analyzer", &self.analyzer.is_some())
            .finish()
    }
}

/// Extracts the chat room display name from the export's header line.
///
/// Android and Windows exports open with a header like
/// `"철수 님과 카카오톡 대화"` (one-to-one) or `"스터디 그룹 3 카카오톡 대화"`
/// (group chat with member count). Falls back to `fallback` (typically the
/// file stem) when the line matches neither shape.
pub fn chat_name_from_header(line: &str, fallback: &str) -> String {
    let header = Regex::new(HEADER_PATTERN).expect("header pattern is valid");
    if let Some(caps) = header.captures(line) {
        if let Some(name) = caps.get(1).or_else(|| caps.get(2)) {
            return name.as_str().to_string();
        }
    }
    fallback.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::sync::Arc;

    fn ts() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2023, 1, 5)
            .unwrap()
            .and_hms_opt(10, 28, 0)
            .unwrap()
    }

    #[test]
    fn test_append_preserves_order() {
        let mut room = Chatroom::new("test");
        room.append(ts(), "Alice", "first");
        room.append(ts(), "Bob", "second");

        assert_eq!(room.len(), 2);
        assert_eq!(room.messages()[0].content, "first");
        assert_eq!(room.messages()[1].content, "second");
    }

    #[test]
    fn test_default_tokenizer_counts_words() {
        let mut room = Chatroom::new("test");
        room.append(ts(), "Alice", "hello world");
        room.append(ts(), "Bob", "hello again");

        assert_eq!(room.word_counts().get("hello"), Some(&2));
        assert_eq!(room.word_counts().get("world"), Some(&1));
    }

    #[test]
    fn test_custom_analyzer() {
        let mut room = Chatroom::with_analyzer(
            "test",
            Arc::new(|content: &str| vec![content.to_lowercase()]),
        );
        room.append(ts(), "Alice", "HELLO");
        room.append(ts(), "Bob", "hello");

        assert_eq!(room.word_counts().get("hello"), Some(&2));
    }

    #[test]
    fn test_top_words_deterministic_ties() {
        let mut room = Chatroom::new("test");
        room.append(ts(), "Alice", "b a b a c");

        let top = room.top_words(2);
        assert_eq!(top, vec![("a", 2), ("b", 2)]);
    }

    #[test]
    fn test_chat_name_one_to_one() {
        assert_eq!(
            chat_name_from_header("철수 님과 카카오톡 대화", "fallback"),
            "철수"
        );
    }

    #[test]
    fn test_chat_name_group() {
        assert_eq!(
            chat_name_from_header("스터디 그룹 3 카카오톡 대화", "fallback"),
            "스터디 그룹"
        );
    }

    #[test]
    fn test_chat_name_fallback() {
        assert_eq!(
            chat_name_from_header("not a kakao header", "fallback"),
            "fallback"
        );
    }
}
