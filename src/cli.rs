//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - CLI argument structure (for use with clap)
//! - [`OutputFormat`] - Output format options
//!
//! The input's export format is detected automatically, so there is no
//! source argument; `kakaopack chat.txt` is the whole invocation.

use std::str::FromStr;

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::format::ExportFormat;

/// Convert KakaoTalk chat exports (Android, Windows, Mac, tablet)
/// into a single CSV or JSON chatroom.
#[derive(Parser, Debug, Clone)]
#[command(name = "kakaopack")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    kakaopack KakaoTalkChats.txt
    kakaopack chat.txt -o room.csv
    kakaopack chat.csv --format json
    kakaopack chat.txt --merge
    kakaopack chat.txt -s android -n \"스터디 모임\"
    kakaopack exported.csv --date-format \"%Y-%m-%d %H:%M:%S\"")]
pub struct Args {
    /// Path to the exported chat file
    pub input: String,

    /// Export format of the input (android, windows, tablet, mac, imported);
    /// detected from the file when omitted
    #[arg(short, long, value_name = "SOURCE", value_parser = ExportFormat::from_str)]
    pub source: Option<ExportFormat>,

    /// Path to output file
    #[arg(short, long, default_value = "chatroom.csv")]
    pub output: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "csv")]
    pub format: OutputFormat,

    /// Merge consecutive messages from the same sender (within 60s)
    #[arg(short, long)]
    pub merge: bool,

    /// Timestamp format for generic imported CSV files
    #[arg(long, value_name = "FORMAT")]
    pub date_format: Option<String>,

    /// Override the chat room name taken from the export header
    #[arg(short, long, value_name = "NAME")]
    pub name: Option<String>,

    /// Print the N most frequent words after parsing
    #[arg(long, value_name = "N")]
    pub top_words: Option<usize>,
}

/// Output format options.
///
/// # Example
///
/// ```rust
/// use kakaopack::cli::OutputFormat;
///
/// let format = OutputFormat::Json;
/// println!("Extension: {}", format.extension()); // "json"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Tabular rows, re-importable as a generic CSV export (default)
    #[default]
    Csv,

    /// JSON object with the chat name and message array
    Json,
}

impl OutputFormat {
    /// Returns the file extension for this format (without dot).
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        }
    }

    /// Returns all supported format names.
    pub fn all_names() -> &'static [&'static str] {
        &["csv", "json"]
    }

    /// Returns the MIME type for this format.
    pub fn mime_type(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "text/csv",
            OutputFormat::Json => "application/json",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Csv => write!(f, "CSV"),
            OutputFormat::Json => write!(f, "JSON"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!(
                "Unknown format: '{}'. Expected one of: {}",
                s,
                OutputFormat::all_names().join(", ")
            )),
        }
    }
}
