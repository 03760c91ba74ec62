//! Unified error types for kakaopack.
//!
//! This module provides a single [`KakaopackError`] enum that covers all error
//! cases in the library, following the pattern used by popular crates like
//! `reqwest`, `serde_json`, and `csv`.
//!
//! Two failure classes matter to callers and are kept distinguishable:
//!
//! - [`KakaopackError::FormatUnrecognized`] — no export format matched the
//!   file prefix; the whole import is aborted before any message is emitted.
//! - [`KakaopackError::Timestamp`] — a CSV record's timestamp did not match
//!   the configured template; the current file's import is aborted because
//!   record order can no longer be trusted.
//!
//! Everything else (unreadable files, malformed CSV framing) maps onto the
//! wrapped `io`/`csv` errors.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A specialized [`Result`] type for kakaopack operations.
///
/// # Example
///
/// ```rust
/// use kakaopack::error::Result;
/// use kakaopack::Message;
///
/// fn my_function() -> Result<Vec<Message>> {
///     // ... operations that may fail
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, KakaopackError>;

/// The error type for all kakaopack operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum KakaopackError {
    /// An I/O error occurred.
    ///
    /// This typically happens when the input file doesn't exist, permission
    /// is denied, or the disk is full when writing output.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// No export format pattern matched the file prefix.
    ///
    /// Raised by format detection before any message is emitted. The file is
    /// either not a KakaoTalk export or an export syntax this crate does not
    /// know about.
    #[error("could not recognize export format{}", path.as_ref().map(|p| format!(" (file: {})", p.display())).unwrap_or_default())]
    FormatUnrecognized {
        /// The file path, if available.
        path: Option<PathBuf>,
    },

    /// A CSV record's timestamp did not match the configured template.
    ///
    /// Only produced by the tabular import route. Aborts the current file:
    /// once one record's timestamp is unreadable, the order integrity of the
    /// remaining records cannot be trusted.
    #[error("invalid timestamp '{input}' (expected format '{format}')")]
    Timestamp {
        /// The timestamp text that failed to parse.
        input: String,
        /// The chrono format template that was expected.
        format: String,
    },

    /// CSV reading/writing error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error (output writers).
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl KakaopackError {
    /// Creates a format-unrecognized error with no associated path.
    pub fn format_unrecognized() -> Self {
        KakaopackError::FormatUnrecognized { path: None }
    }

    /// Creates a format-unrecognized error for a specific file.
    pub fn format_unrecognized_at(path: impl Into<PathBuf>) -> Self {
        KakaopackError::FormatUnrecognized {
            path: Some(path.into()),
        }
    }

    /// Creates a timestamp parse error.
    pub fn timestamp(input: impl Into<String>, format: impl Into<String>) -> Self {
        KakaopackError::Timestamp {
            input: input.into(),
            format: format.into(),
        }
    }

    /// Attaches a file path to a [`FormatUnrecognized`](Self::FormatUnrecognized)
    /// error; other variants pass through unchanged.
    pub(crate) fn with_path(self, file: &std::path::Path) -> Self {
        match self {
            KakaopackError::FormatUnrecognized { path: None } => {
                KakaopackError::FormatUnrecognized {
                    path: Some(file.to_path_buf()),
                }
            }
            other => other,
        }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, KakaopackError::Io(_))
    }

    /// Returns `true` if this is a format detection failure.
    pub fn is_format_unrecognized(&self) -> bool {
        matches!(self, KakaopackError::FormatUnrecognized { .. })
    }

    /// Returns `true` if this is a timestamp parse failure.
    pub fn is_timestamp(&self) -> bool {
        matches!(self, KakaopackError::Timestamp { .. })
    }
}
