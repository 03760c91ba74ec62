//! Output writers for parsed chatrooms.
//!
//! Two formats:
//! - [`write_csv`] / [`to_csv`]: `Date,User,Message` rows, the same shape the
//!   tabular exports use, so a written file can be imported back as the
//!   Imported format.
//! - [`write_json`] / [`to_json`]: a single JSON object with the chat name
//!   and the message array.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::Chatroom;
use crate::error::Result;
use crate::message::Message;

const CSV_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Writes the chatroom's messages to a CSV file.
pub fn write_csv(room: &Chatroom, output_path: impl AsRef<Path>) -> Result<()> {
    let file = File::create(output_path)?;
    write_csv_to(room, file)
}

/// Renders the chatroom's messages as a CSV string.
pub fn to_csv(room: &Chatroom) -> Result<String> {
    let mut buf = Vec::new();
    write_csv_to(room, &mut buf)?;
    // The csv writer only ever emits UTF-8.
    Ok(String::from_utf8(buf).unwrap_or_default())
}

fn write_csv_to<W: Write>(room: &Chatroom, writer: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(["Date", "User", "Message"])?;
    for msg in room.messages() {
        writer.write_record([
            &msg.timestamp.format(CSV_TIMESTAMP_FORMAT).to_string(),
            &msg.sender,
            &msg.content,
        ])?;
    }
    writer.flush()?;
    Ok(())
}

#[derive(Serialize)]
struct JsonChatroom<'a> {
    name: &'a str,
    messages: &'a [Message],
}

/// Writes the chatroom to a JSON file.
pub fn write_json(room: &Chatroom, output_path: impl AsRef<Path>) -> Result<()> {
    let json = to_json(room)?;
    let mut file = File::create(output_path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}

/// Renders the chatroom as a pretty-printed JSON string.
pub fn to_json(room: &Chatroom) -> Result<String> {
    let doc = JsonChatroom {
        name: room.name(),
        messages: room.messages(),
    };
    Ok(serde_json::to_string_pretty(&doc)?)
}
