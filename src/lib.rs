//! # Kakaopack
//!
//! A Rust library for parsing KakaoTalk chat-log exports into a unified,
//! queryable chatroom.
//!
//! ## Overview
//!
//! KakaoTalk writes a different file layout on every platform. Kakaopack
//! auto-detects the layout from the first few kilobytes and parses:
//! - **Android** — text export, `2023년 1월 5일 오전 10:28, 철수 : …` lines
//! - **Windows** — desktop export, `[철수] [오전 10:28] …` lines
//! - **Tablet** — iPad export, `2023. 1. 5. 오전 10:28, 철수 : …` lines
//! - **Mac** — desktop CSV export with second-precision timestamps
//! - **Imported** — generic `timestamp,sender,content` CSV files
//!
//! All of them end up as the same [`Chatroom`] of timestamped [`Message`]s,
//! with optional merging of rapid-fire messages from the same sender and
//! caller-injected filter hooks.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use kakaopack::config::{Hooks, ParseConfig};
//! use kakaopack::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let config = ParseConfig::new().with_merge(true);
//!     let room = import_file(Path::new("KakaoTalkChats.txt"), &config, &Hooks::new())?;
//!
//!     println!("{}: {} messages", room.name(), room.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Hooks
//!
//! Every parse accepts a [`Hooks`](config::Hooks) bundle for dropping raw
//! lines, dropping messages by content, rewriting content before it lands
//! in the chatroom, and observing progress:
//!
//! ```rust
//! use kakaopack::config::{Hooks, ParseConfig};
//! use kakaopack::import_str;
//!
//! let hooks = Hooks::new()
//!     .with_msg_filter(|content| content == "사진")
//!     .with_preprocessor(|content| content.replace("ㅋㅋ", "(웃음)"));
//!
//! let room = import_str(
//!     "2023년 1월 5일 오전 10:28\n2023년 1월 5일 오전 10:28, 철수 : 안녕하세요",
//!     "chat",
//!     &ParseConfig::new(),
//!     &hooks,
//! ).unwrap();
//! assert_eq!(room.len(), 1);
//! ```
//!
//! ## Module Structure
//!
//! - [`parse`] — entry points [`import_file`] and [`import_str`], plus the
//!   streaming and tabular engines
//! - [`format`] — [`ExportFormat`](format::ExportFormat) detection and the
//!   per-format line recognizers
//! - [`chatroom`] / [`message`] — the parsed result types
//! - [`config`] — [`ParseConfig`](config::ParseConfig) and
//!   [`Hooks`](config::Hooks)
//! - [`progress`] — progress reporting types
//! - [`output`] — CSV/JSON writers for parsed chatrooms
//! - [`cli`] — CLI types (requires the `cli` feature)
//! - [`error`] — [`KakaopackError`], [`Result`]
//! - [`prelude`] — convenient re-exports

#[cfg(feature = "cli")]
pub mod cli;
pub mod chatroom;
pub mod config;
pub mod error;
pub mod format;
pub mod message;
pub mod output;
pub mod parse;
pub mod progress;

// Re-export the main types at the crate root for convenience
pub use chatroom::Chatroom;
pub use error::{KakaopackError, Result};
pub use message::Message;
pub use parse::{import_file, import_file_as, import_str, import_str_as};

/// Convenient re-exports for common usage.
///
/// Import everything you need with a single line:
///
/// ```rust
/// use kakaopack::prelude::*;
/// ```
pub mod prelude {
    // Core result types
    pub use crate::chatroom::Chatroom;
    pub use crate::message::Message;

    // Error types
    pub use crate::error::{KakaopackError, Result};

    // Parsing
    pub use crate::config::{Hooks, ParseConfig};
    pub use crate::format::{ExportFormat, detect_format};
    pub use crate::parse::{import_file, import_file_as, import_str, import_str_as};

    // Progress
    pub use crate::progress::{Progress, ProgressCallback};

    // Output
    pub use crate::output::{to_csv, to_json, write_csv, write_json};
}
