//! Per-line outcomes and persistence statistics

use crate::app::models::{ParseWarning, QuoteRecord, StorageKey};
use crate::app::services::line_parser::ParseError;
use crate::constants::REJECTION_FRAGMENT_CHARS;
use serde::Serialize;

/// A line that parsed into a quote record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportedQuote {
    /// 1-based physical line number in the batch
    pub line_number: usize,
    pub storage_key: StorageKey,
    pub record: QuoteRecord,
}

/// A line rejected by the parser
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineRejection {
    pub line_number: usize,
    pub error: ParseError,
    /// Leading characters of the line, for locating it in the batch
    pub fragment: String,
}

impl LineRejection {
    pub fn new(line_number: usize, error: ParseError, line: &str) -> Self {
        Self {
            line_number,
            error,
            fragment: line_fragment(line),
        }
    }
}

/// A soft anomaly on an accepted line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineWarning {
    pub line_number: usize,
    pub warning: ParseWarning,
}

/// Outcome of parsing a whole batch
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchReport {
    /// Non-blank lines seen
    pub lines_processed: usize,
    pub successes: Vec<ImportedQuote>,
    pub failures: Vec<LineRejection>,
    pub warnings: Vec<LineWarning>,
}

impl BatchReport {
    /// True when no line was rejected
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Calculate success rate as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.lines_processed == 0 {
            100.0
        } else {
            (self.successes.len() as f64 / self.lines_processed as f64) * 100.0
        }
    }

    /// Create a summary string for logging
    pub fn summary(&self) -> String {
        format!(
            "{} lines: {} parsed, {} rejected, {} warnings ({:.1}% success)",
            self.lines_processed,
            self.successes.len(),
            self.failures.len(),
            self.warnings.len(),
            self.success_rate()
        )
    }
}

/// Statistics for writing a report's successes to the store
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PersistStats {
    pub attempted: usize,
    pub saved: usize,
    pub failed: usize,
    /// One message per failed write
    pub errors: Vec<String>,
    /// Document ids written, in batch order
    pub saved_ids: Vec<String>,
}

impl PersistStats {
    pub fn record_saved(&mut self, id: String) {
        self.attempted += 1;
        self.saved += 1;
        self.saved_ids.push(id);
    }

    pub fn record_failure(&mut self, message: String) {
        self.attempted += 1;
        self.failed += 1;
        self.errors.push(message);
    }

    /// Create a summary string for logging
    pub fn summary(&self) -> String {
        format!(
            "{} attempted: {} saved, {} failed",
            self.attempted, self.saved, self.failed
        )
    }
}

/// First characters of a line, counted in chars so Hangul is never split
pub fn line_fragment(line: &str) -> String {
    line.chars().take(REJECTION_FRAGMENT_CHARS).collect()
}
