//! Parse configuration and injected hook functions.
//!
//! [`ParseConfig`] carries the plain settings (merge mode, CSV timestamp
//! template) and is serde-serializable. The pluggable functions (filters,
//! preprocessor, word tokenizer, progress callback) live in [`Hooks`],
//! which is a separate struct because closures don't serialize.
//!
//! # Example
//!
//! ```rust
//! use kakaopack::config::{Hooks, ParseConfig};
//!
//! let config = ParseConfig::new().with_merge(true);
//!
//! let hooks = Hooks::new()
//!     .with_msg_filter(|content| content.contains("삭제된 메시지입니다"))
//!     .with_preprocessor(|content| content.trim_end().to_string());
//! ```

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::progress::{Progress, ProgressCallback};

/// Default timestamp template for the generic imported CSV format.
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Coalescing window: consecutive same-sender messages at most this many
/// seconds apart merge into one. The interval is closed: exactly 60 counts.
pub const MERGE_WINDOW_SECS: i64 = 60;

/// Plain parse settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseConfig {
    /// Coalesce rapid consecutive messages from the same sender
    /// (≤ [`MERGE_WINDOW_SECS`] apart) into one message (default: false).
    pub merge: bool,

    /// chrono timestamp template for the generic imported CSV format
    /// (default: `"%Y-%m-%d %H:%M"`). The macOS CSV format always uses its
    /// own seconds-bearing template.
    pub date_format: String,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            merge: false,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

impl ParseConfig {
    /// Creates a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables or disables merge mode.
    #[must_use]
    pub fn with_merge(mut self, merge: bool) -> Self {
        self.merge = merge;
        self
    }

    /// Sets the timestamp template for the generic imported CSV format.
    #[must_use]
    pub fn with_date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = format.into();
        self
    }
}

/// Predicate over a raw, unparsed line. Returns `true` to drop the line.
pub type LineFilter = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// Predicate over extracted message content. Returns `true` to drop the
/// message.
pub type MessageFilter = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// Transforms final merged content exactly once, immediately before emission.
pub type Preprocessor = Arc<dyn Fn(String) -> String + Send + Sync>;

/// Splits message content into word tokens for the chatroom's frequency
/// table.
pub type LineAnalyzer = Arc<dyn Fn(&str) -> Vec<String> + Send + Sync>;

/// Optional injected functions consulted by the parse engines.
///
/// All hooks are optional and pure with respect to engine state: dropping a
/// line or message never disturbs the date cursor or merge bookkeeping
/// beyond the documented skip.
#[derive(Clone, Default)]
pub struct Hooks {
    /// Drops raw lines before any recognizer sees them (streaming engine
    /// only; CSV records have no raw-line form).
    pub line_filter: Option<LineFilter>,

    /// Drops messages by extracted content (both engines).
    pub msg_filter: Option<MessageFilter>,

    /// Rewrites final merged content once, at flush time.
    pub preprocessor: Option<Preprocessor>,

    /// Word tokenizer handed to the [`Chatroom`](crate::Chatroom); default
    /// is a whitespace split.
    pub line_analyzer: Option<LineAnalyzer>,

    /// Progress callback, advanced in line units.
    pub progress: Option<ProgressCallback>,
}

impl Hooks {
    /// Creates an empty hook set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs a raw-line filter. The predicate returns `true` for lines
    /// to drop.
    #[must_use]
    pub fn with_line_filter(mut self, f: impl Fn(&str) -> bool + Send + Sync + 'static) -> Self {
        self.line_filter = Some(Arc::new(f));
        self
    }

    /// Installs a message-content filter. The predicate returns `true` for
    /// messages to drop.
    #[must_use]
    pub fn with_msg_filter(mut self, f: impl Fn(&str) -> bool + Send + Sync + 'static) -> Self {
        self.msg_filter = Some(Arc::new(f));
        self
    }

    /// Installs a content preprocessor applied once per emitted message.
    #[must_use]
    pub fn with_preprocessor(
        mut self,
        f: impl Fn(String) -> String + Send + Sync + 'static,
    ) -> Self {
        self.preprocessor = Some(Arc::new(f));
        self
    }

    /// Installs a word tokenizer for the chatroom's frequency table.
    #[must_use]
    pub fn with_line_analyzer(
        mut self,
        f: impl Fn(&str) -> Vec<String> + Send + Sync + 'static,
    ) -> Self {
        self.line_analyzer = Some(Arc::new(f));
        self
    }

    /// Installs a progress callback.
    #[must_use]
    pub fn with_progress(mut self, callback: ProgressCallback) -> Self {
        self.progress = Some(callback);
        self
    }

    pub(crate) fn drops_line(&self, line: &str) -> bool {
        self.line_filter.as_ref().is_some_and(|f| f(line))
    }

    pub(crate) fn drops_message(&self, content: &str) -> bool {
        self.msg_filter.as_ref().is_some_and(|f| f(content))
    }

    pub(crate) fn preprocess(&self, content: String) -> String {
        match &self.preprocessor {
            Some(f) => f(content),
            None => content,
        }
    }

    pub(crate) fn report(&self, progress: Progress) {
        if let Some(callback) = &self.progress {
            callback(progress);
        }
    }
}

impl fmt::Debug for Hooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hooks")
            .field("line_filter", &self.line_filter.is_some())
            .field("msg_filter", &self.msg_filter.is_some())
            .field("preprocessor", &self.preprocessor.is_some())
            .field("line_analyzer", &self.line_analyzer.is_some())
            .field("progress", &self.progress.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = ParseConfig::default();
        assert!(!config.merge);
        assert_eq!(config.date_format, "%Y-%m-%d %H:%M");
    }

    #[test]
    fn test_config_builder() {
        let config = ParseConfig::new()
            .with_merge(true)
            .with_date_format("%d/%m/%Y %H:%M");
        assert!(config.merge);
        assert_eq!(config.date_format, "%d/%m/%Y %H:%M");
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = ParseConfig::new().with_merge(true);
        let json = serde_json::to_string(&config).unwrap();
        let parsed: ParseConfig = serde_json::from_str(&json).unwrap();
        assert!(parsed.merge);
        assert_eq!(parsed.date_format, config.date_format);
    }

    #[test]
    fn test_empty_hooks_pass_everything() {
        let hooks = Hooks::new();
        assert!(!hooks.drops_line("anything"));
        assert!(!hooks.drops_message("anything"));
        assert_eq!(hooks.preprocess("text".to_string()), "text");
    }

    #[test]
    fn test_filters() {
        let hooks = Hooks::new()
            .with_line_filter(|line| line.starts_with('#'))
            .with_msg_filter(|content| content.is_empty());

        assert!(hooks.drops_line("# comment"));
        assert!(!hooks.drops_line("normal"));
        assert!(hooks.drops_message(""));
        assert!(!hooks.drops_message("hi"));
    }

    #[test]
    fn test_preprocessor() {
        let hooks = Hooks::new().with_preprocessor(|content| content.to_uppercase());
        assert_eq!(hooks.preprocess("abc".to_string()), "ABC");
    }

    #[test]
    fn test_hooks_debug_shows_presence() {
        let hooks = Hooks::new().with_msg_filter(|_| false);
        let debug = format!("{:?}", hooks);
        assert!(debug.contains("msg_filter: true"));
        assert!(debug.contains("line_filter: false"));
    }
}
