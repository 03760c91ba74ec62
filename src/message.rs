//! The normalized message type shared by every export format.
//!
//! All five export syntaxes reduce to the same triple: when a message was
//! sent, who sent it, and what they said. Timestamps have minute resolution
//! for the line-syntax formats (the exports carry no seconds) and second
//! resolution for the macOS CSV route.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use kakaopack::Message;
//!
//! let ts = NaiveDate::from_ymd_opt(2023, 1, 5)
//!     .unwrap()
//!     .and_hms_opt(10, 28, 0)
//!     .unwrap();
//! let msg = Message::new(ts, "철수", "안녕하세요");
//! assert_eq!(msg.sender(), "철수");
//! assert!(!msg.is_multiline());
//! ```

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A single chat message with sender and timestamp attribution.
///
/// Immutable once emitted by a parse engine: merging and continuation-line
/// accumulation happen on the engine's pending slot, never on an emitted
/// `Message`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// When the message was sent. Naive: KakaoTalk exports carry no time
    /// zone information.
    pub timestamp: NaiveDateTime,

    /// Display name of the message author.
    pub sender: String,

    /// Text content. Multi-line messages and merged rapid-fire messages
    /// contain embedded `\n` separators.
    pub content: String,
}

impl Message {
    /// Creates a new message.
    pub fn new(
        timestamp: NaiveDateTime,
        sender: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            sender: sender.into(),
            content: content.into(),
        }
    }

    /// Returns the sender name.
    pub fn sender(&self) -> &str {
        &self.sender
    }

    /// Returns the message content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the timestamp.
    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    /// Returns `true` if the content spans multiple lines (continuations or
    /// merged messages).
    pub fn is_multiline(&self) -> bool {
        self.content.contains('\n')
    }

    /// Number of physical lines the content occupies.
    pub fn line_count(&self) -> usize {
        self.content.matches('\n').count() + 1
    }
}
