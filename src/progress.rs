//! Progress reporting for long-running imports.
//!
//! The parse engines advance progress in physical-line units: one unit per
//! consumed line, or `1 +` the number of embedded line breaks in the emitted
//! content when a message-start line triggers emission. The total is the
//! file's line count, known up front from the line-counting file opener.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use kakaopack::progress::{Progress, ProgressCallback};
//!
//! let callback: ProgressCallback = Arc::new(|progress: Progress| {
//!     if let Some(pct) = progress.percentage() {
//!         eprintln!("{:.1}%", pct);
//!     }
//! });
//!
//! callback(Progress::new(50, Some(200)));
//! ```

use std::sync::Arc;

/// A snapshot of import progress, in line units.
#[derive(Debug, Clone, Copy, Default)]
pub struct Progress {
    /// Line units consumed so far.
    pub lines_processed: usize,

    /// Total line units, if known.
    pub total_lines: Option<usize>,
}

impl Progress {
    /// Creates a new progress snapshot.
    pub fn new(lines_processed: usize, total_lines: Option<usize>) -> Self {
        Self {
            lines_processed,
            total_lines,
        }
    }

    /// Progress as a percentage (0.0 – 100.0), or `None` when the total is
    /// unknown.
    pub fn percentage(&self) -> Option<f64> {
        self.total_lines.map(|total| {
            if total == 0 {
                100.0
            } else {
                (self.lines_processed as f64 / total as f64) * 100.0
            }
        })
    }

    /// Returns `true` once all known lines were consumed.
    pub fn is_complete(&self) -> bool {
        self.total_lines
            .map(|total| self.lines_processed >= total)
            .unwrap_or(false)
    }

    /// Line units still to go, or `None` when the total is unknown.
    pub fn remaining(&self) -> Option<usize> {
        self.total_lines
            .map(|total| total.saturating_sub(self.lines_processed))
    }
}

/// Thread-safe callback receiving [`Progress`] snapshots.
pub type ProgressCallback = Arc<dyn Fn(Progress) + Send + Sync>;

/// A no-op progress callback, for APIs that require one.
pub fn no_progress() -> ProgressCallback {
    Arc::new(|_| {})
}

/// A callback that prints percentages to stderr, for CLI use.
pub fn stderr_progress() -> ProgressCallback {
    Arc::new(|progress| {
        if let Some(pct) = progress.percentage() {
            eprintln!("Progress: {:.1}%", pct);
        }
    })
}
