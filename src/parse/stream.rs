//! Streaming parse engine for the line-syntax formats.
//!
//! A small state machine over lines with two pieces of persistent state: the
//! date cursor (the most recently seen date-header line) and a single
//! pending-message slot. Per line, recognizers run in fixed priority:
//!
//! 1. raw-line filter (drop, no state change)
//! 2. date header: flush the pending message unless merge mode is on,
//!    then move the cursor
//! 3. message start: half-day clock arithmetic, content filter, then merge
//!    into or replace the pending message
//! 4. continuation: appended to the pending content unless the line is a
//!    known noise shape
//! 5. anything else is silently discarded (export-format drift tolerance)
//!
//! Message timestamps combine the date cursor with the line's 12-hour clock:
//! hour 12 maps to 0, then the `오후` marker adds 12.

use chrono::{NaiveDate, NaiveDateTime};
use regex::Captures;

use crate::Chatroom;
use crate::config::{Hooks, ParseConfig};
use crate::format::{ExportFormat, LineRules, PM_MARKER};
use crate::progress::Progress;

use super::{PendingMessage, flush_pending, within_merge_window};

/// One parse pass over one file's body lines.
///
/// All scan state lives here, so several files can be imported in sequence
/// without any ambient state leaking between them.
pub struct StreamSession<'h> {
    rules: LineRules,
    merge: bool,
    hooks: &'h Hooks,
    cursor: Option<NaiveDate>,
    pending: Option<PendingMessage>,
    prev_sender: String,
    prev_ts: Option<NaiveDateTime>,
    lines_done: usize,
    total_lines: Option<usize>,
}

impl<'h> StreamSession<'h> {
    /// Creates a session for one of the line-syntax formats.
    ///
    /// # Panics
    ///
    /// Panics if `format` is tabular; those route through
    /// [`tabular`](super::tabular).
    pub fn new(
        format: ExportFormat,
        config: &ParseConfig,
        hooks: &'h Hooks,
        total_lines: Option<usize>,
    ) -> Self {
        let rules = LineRules::for_format(format)
            .unwrap_or_else(|| panic!("{format} is a tabular format, not a line-syntax format"));
        Self {
            rules,
            merge: config.merge,
            hooks,
            cursor: None,
            pending: None,
            prev_sender: String::new(),
            prev_ts: None,
            lines_done: 0,
            total_lines,
        }
    }

    /// Consumes all body lines and flushes the remainder.
    pub fn run<'s>(mut self, lines: impl Iterator<Item = &'s str>, room: &mut Chatroom) {
        for line in lines {
            let units = self.feed(line, room);
            self.advance(units);
        }
        flush_pending(&mut self.pending, self.hooks, room);
    }

    /// Processes one line; returns the progress units it consumed.
    fn feed(&mut self, line: &str, room: &mut Chatroom) -> usize {
        if self.hooks.drops_line(line) {
            return 1;
        }

        if let Some(caps) = self.rules.date_header.captures(line) {
            self.on_date_header(&caps, room);
            return 1;
        }

        if let Some(caps) = self.rules.message_start.captures(line) {
            return self.on_message_start(&caps, room);
        }

        if self.pending.is_some() && !line.is_empty() && !self.rules.noise.is_match(line) {
            // Continuation text of the pending multi-line message.
            if let Some(pending) = self.pending.as_mut() {
                pending.push_line(line);
            }
        }
        1
    }

    fn on_date_header(&mut self, caps: &Captures<'_>, room: &mut Chatroom) {
        // A date-ish line that doesn't form a real date is ignored, cursor
        // untouched.
        let Some(date) = captured_date(caps) else {
            return;
        };
        if !self.merge {
            flush_pending(&mut self.pending, self.hooks, room);
        }
        self.cursor = Some(date);
    }

    /// Returns the progress units: 1 normally, `1 + embedded breaks` of the
    /// emitted content when this line flushed the pending message.
    fn on_message_start(&mut self, caps: &Captures<'_>, room: &mut Chatroom) -> usize {
        let sender = &caps["name"];
        // Sender tracking advances even for filtered messages; a dropped
        // message still breaks the previous sender's merge run.
        let prev_sender = std::mem::replace(&mut self.prev_sender, sender.to_string());

        let content = &caps["con"];
        if self.hooks.drops_message(content) {
            return 1;
        }

        // No date header yet, or a clock that doesn't exist: skip leniently.
        let Some(timestamp) = self
            .cursor
            .and_then(|date| captured_time(caps).and_then(|(h, m)| date.and_hms_opt(h, m, 0)))
        else {
            return 1;
        };

        let mergeable = self.merge
            && sender == prev_sender
            && self.prev_ts.is_some_and(|prev| within_merge_window(prev, timestamp));
        self.prev_ts = Some(timestamp);

        if mergeable {
            if let Some(pending) = self.pending.as_mut() {
                pending.push_line(content);
                return 1;
            }
        }

        let units = 1 + self.pending.as_ref().map_or(0, PendingMessage::embedded_breaks);
        flush_pending(&mut self.pending, self.hooks, room);
        self.pending = Some(PendingMessage::new(timestamp, sender, content));
        units
    }

    fn advance(&mut self, units: usize) {
        self.lines_done += units;
        self.hooks
            .report(Progress::new(self.lines_done, self.total_lines));
    }
}

fn captured_date(caps: &Captures<'_>) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(
        caps["year"].parse().ok()?,
        caps["month"].parse().ok()?,
        caps["day"].parse().ok()?,
    )
}

/// 12-hour clock to 24-hour: hour 12 wraps to 0, the PM marker adds 12.
fn captured_time(caps: &Captures<'_>) -> Option<(u32, u32)> {
    let mut hour: u32 = caps["hour"].parse().ok()?;
    let minute: u32 = caps["min"].parse().ok()?;
    if hour == 12 {
        hour = 0;
    }
    if &caps["afm"] == PM_MARKER {
        hour += 12;
    }
    Some((hour, minute))
}

/// Runs the streaming engine over in-memory body lines (no header line).
///
/// Mostly a convenience for tests and callers that already stripped the
/// export header; [`import_str`](super::import_str) handles whole exports.
pub fn parse_str(
    content: &str,
    format: ExportFormat,
    config: &ParseConfig,
    hooks: &Hooks,
    room: &mut Chatroom,
) {
    let total = content.lines().count();
    StreamSession::new(format, config, hooks, Some(total)).run(content.lines(), room);
}
