//! Parse engines and the import entry points.
//!
//! Two engines share one merge/flush discipline:
//!
//! - [`stream`] — line-by-line state machine for the Android, Windows, and
//!   Tablet text formats (date-header lines, multi-line continuations,
//!   noise suppression).
//! - [`tabular`] — CSV record reader for the macOS and generic imported
//!   formats (explicit timestamp field, header row, no line grammar).
//!
//! Both keep at most one [`PendingMessage`] (a lookahead depth of exactly
//! one) and always flush it before replacing it; a pending message is never
//! silently discarded. [`import_file`] and [`import_str`] detect the format
//! and route to the right engine.
//!
//! ```rust,no_run
//! use std::path::Path;
//! use kakaopack::config::{Hooks, ParseConfig};
//! use kakaopack::parse::import_file;
//!
//! let config = ParseConfig::new().with_merge(true);
//! let room = import_file(Path::new("KakaoTalk_Chat.txt"), &config, &Hooks::new())?;
//! println!("{}: {} messages", room.name(), room.len());
//! # Ok::<(), kakaopack::KakaopackError>(())
//! ```

pub mod stream;
pub mod tabular;

use std::fs;
use std::path::Path;

use chrono::NaiveDateTime;

use crate::Chatroom;
use crate::chatroom::chat_name_from_header;
use crate::config::{Hooks, MERGE_WINDOW_SECS, ParseConfig};
use crate::error::Result;
use crate::format::{DETECT_PREFIX_BYTES, ExportFormat, detect_format};

/// The single message awaiting flush or merge.
///
/// Continuation lines and merged rapid-fire messages accumulate here with
/// embedded line breaks; the preprocessor runs exactly once, at flush.
#[derive(Debug)]
pub(crate) struct PendingMessage {
    pub(crate) timestamp: NaiveDateTime,
    pub(crate) sender: String,
    pub(crate) content: String,
}

impl PendingMessage {
    pub(crate) fn new(timestamp: NaiveDateTime, sender: &str, content: &str) -> Self {
        Self {
            timestamp,
            sender: sender.to_string(),
            content: content.to_string(),
        }
    }

    /// Appends continuation or merged text with an embedded line break.
    pub(crate) fn push_line(&mut self, line: &str) {
        self.content.push('\n');
        self.content.push_str(line);
    }

    /// Embedded line breaks accumulated so far.
    pub(crate) fn embedded_breaks(&self) -> usize {
        self.content.matches('\n').count()
    }
}

/// Closed merge window: a gap of exactly [`MERGE_WINDOW_SECS`] still merges,
/// one second more does not. Negative gaps (out-of-order input) never merge.
pub(crate) fn within_merge_window(prev: NaiveDateTime, next: NaiveDateTime) -> bool {
    let gap = (next - prev).num_seconds();
    (0..=MERGE_WINDOW_SECS).contains(&gap)
}

/// Emits the pending message, applying the preprocessor exactly once.
pub(crate) fn flush_pending(
    pending: &mut Option<PendingMessage>,
    hooks: &Hooks,
    room: &mut Chatroom,
) {
    if let Some(msg) = pending.take() {
        let content = hooks.preprocess(msg.content);
        room.append(msg.timestamp, msg.sender, content);
    }
}

/// Builds the sink, wiring in the injected word tokenizer when present.
fn new_chatroom(name: impl Into<String>, hooks: &Hooks) -> Chatroom {
    match &hooks.line_analyzer {
        Some(analyzer) => Chatroom::with_analyzer(name, analyzer.clone()),
        None => Chatroom::new(name),
    }
}

/// Reads the file and counts its physical lines for progress totals.
///
/// UTF-8 is preferred; undecodable bytes fall back to lossy replacement so
/// a stray legacy-encoded notice can't abort a whole import.
fn read_counted(path: &Path) -> Result<(String, usize)> {
    let bytes = fs::read(path)?;
    let text = match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
    };
    let lines = text.lines().count();
    Ok((text, lines))
}

/// The bounded prefix format detection inspects, trimmed back to a char
/// boundary.
fn detection_prefix(text: &str) -> &str {
    let mut end = text.len().min(DETECT_PREFIX_BYTES);
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

/// Imports a KakaoTalk export file into a [`Chatroom`].
///
/// Detects the export format from the file prefix, then routes to the
/// streaming or tabular engine. The chat room name comes from the export's
/// header line where the format carries one, otherwise from the file stem.
///
/// # Errors
///
/// - [`FormatUnrecognized`](crate::KakaopackError::FormatUnrecognized) when
///   no export pattern matches the prefix (reported with the file path).
/// - [`Timestamp`](crate::KakaopackError::Timestamp) when a CSV record's
///   timestamp does not match the configured template.
/// - I/O and CSV framing errors pass through.
pub fn import_file(path: &Path, config: &ParseConfig, hooks: &Hooks) -> Result<Chatroom> {
    let (text, _) = read_counted(path)?;
    let fallback = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "chat".to_string());

    import_str(&text, &fallback, config, hooks).map_err(|err| err.with_path(path))
}

/// Imports export content already in memory.
///
/// Same semantics as [`import_file`]; `fallback_name` stands in for the
/// file stem when the content carries no usable header.
pub fn import_str(
    content: &str,
    fallback_name: &str,
    config: &ParseConfig,
    hooks: &Hooks,
) -> Result<Chatroom> {
    let format = detect_format(detection_prefix(content))?;
    import_str_as(content, format, fallback_name, config, hooks)
}

/// Imports a file with a caller-chosen format, bypassing detection.
pub fn import_file_as(
    path: &Path,
    format: ExportFormat,
    config: &ParseConfig,
    hooks: &Hooks,
) -> Result<Chatroom> {
    let (text, _) = read_counted(path)?;
    let fallback = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "chat".to_string());

    import_str_as(&text, format, &fallback, config, hooks).map_err(|err| err.with_path(path))
}

/// Imports in-memory content as a specific export format.
pub fn import_str_as(
    content: &str,
    format: ExportFormat,
    fallback_name: &str,
    config: &ParseConfig,
    hooks: &Hooks,
) -> Result<Chatroom> {
    let line_count = content.lines().count();

    if format.is_tabular() {
        let date_format = format
            .timestamp_format()
            .unwrap_or(config.date_format.as_str());
        let mut room = new_chatroom(fallback_name, hooks);
        tabular::parse_records(
            content.as_bytes(),
            date_format,
            config,
            hooks,
            Some(line_count.saturating_sub(1)),
            &mut room,
        )?;
        return Ok(room);
    }

    // The first physical line is the export header: consumed for the chat
    // name, never fed to the recognizers.
    let mut lines = content.lines();
    let header = lines.next().unwrap_or("").trim_start_matches('\u{feff}');
    let name = if format == ExportFormat::Tablet {
        // Tablet exports open with the room name verbatim.
        header.trim().to_string()
    } else {
        chat_name_from_header(header, fallback_name)
    };

    let mut room = new_chatroom(name, hooks);
    let session =
        stream::StreamSession::new(format, config, hooks, Some(line_count.saturating_sub(1)));
    session.run(lines, &mut room);
    Ok(room)
}
