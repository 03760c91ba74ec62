//! Tabular parse engine for the CSV-shaped exports (Mac, Imported).
//!
//! Records are `timestamp,sender,content`; content cells may contain quoted
//! embedded newlines, which the CSV reader hands back intact. A timestamp
//! the configured format cannot parse aborts the whole file; those exports
//! are machine-written, so a bad cell means the wrong format string rather
//! than drift worth tolerating.

use std::io::Read;

use chrono::NaiveDateTime;

use crate::Chatroom;
use crate::config::{Hooks, ParseConfig};
use crate::error::{KakaopackError, Result};
use crate::progress::Progress;

use super::{PendingMessage, flush_pending, within_merge_window};

/// Parses every record from `reader` into `room`.
pub fn parse_records<R: Read>(
    reader: R,
    date_format: &str,
    config: &ParseConfig,
    hooks: &Hooks,
    total_lines: Option<usize>,
    room: &mut Chatroom,
) -> Result<()> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut pending: Option<PendingMessage> = None;
    let mut prev_ts: Option<NaiveDateTime> = None;
    let mut lines_done = 0usize;

    for record in csv_reader.records() {
        let record = record?;
        let raw_ts = record.get(0).unwrap_or("");
        let sender = record.get(1).unwrap_or("");
        let content = record.get(2).unwrap_or("");

        lines_done += 1 + content.matches('\n').count();
        hooks.report(Progress::new(lines_done, total_lines));

        if content.is_empty() || hooks.drops_message(content) {
            continue;
        }

        let timestamp = NaiveDateTime::parse_from_str(raw_ts, date_format)
            .map_err(|_| KakaopackError::timestamp(raw_ts, date_format))?;

        if config.merge {
            if let (Some(open), Some(prev)) = (pending.as_mut(), prev_ts) {
                // Gap is measured against the previous record's own
                // timestamp, not the open message's first one.
                if open.sender == sender && within_merge_window(prev, timestamp) {
                    open.push_line(content);
                    prev_ts = Some(timestamp);
                    continue;
                }
            }
        }

        flush_pending(&mut pending, hooks, room);
        pending = Some(PendingMessage::new(timestamp, sender, content));
        prev_ts = Some(timestamp);
    }

    flush_pending(&mut pending, hooks, room);
    Ok(())
}
