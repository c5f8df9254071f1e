//! Batch parsing and persistence orchestration

use super::stats::{BatchReport, ImportedQuote, LineRejection, LineWarning, PersistStats};
use crate::app::models::ParseContext;
use crate::app::services::document_store::DocumentStore;
use crate::app::services::line_parser::LineParser;
use crate::{Error, Result};
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, info};

/// Parse every non-blank line of a batch
///
/// Lines are numbered from 1 by physical position, blank lines included, so
/// reported numbers match what the operator pasted. A rejected line never
/// stops the batch.
pub fn import_batch(text: &str, ctx: &ParseContext, parser: &LineParser) -> BatchReport {
    let mut report = BatchReport::default();

    for (index, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        let line_number = index + 1;
        report.lines_processed += 1;

        match parser.parse_line(line, ctx) {
            Ok(parsed) => {
                report
                    .warnings
                    .extend(parsed.warnings.into_iter().map(|warning| LineWarning {
                        line_number,
                        warning,
                    }));
                report.successes.push(ImportedQuote {
                    line_number,
                    storage_key: parsed.storage_key,
                    record: parsed.record,
                });
            }
            Err(e) => {
                debug!("Line {} rejected: {}", line_number, e);
                report
                    .failures
                    .push(LineRejection::new(line_number, e, line));
            }
        }
    }

    info!("Batch parsed: {}", report.summary());
    report
}

/// Writes parsed quotes to a document store
#[derive(Debug)]
pub struct BatchImporter<S> {
    store: S,
    concurrency: usize,
    show_progress: bool,
}

impl<S: DocumentStore + Sync> BatchImporter<S> {
    /// Create an importer; `concurrency` must be at least 1
    pub fn new(store: S, concurrency: usize) -> Result<Self> {
        if concurrency == 0 {
            return Err(Error::configuration(
                "Import concurrency must be greater than 0",
            ));
        }

        Ok(Self {
            store,
            concurrency,
            show_progress: false,
        })
    }

    /// Show a progress bar while writing
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Write every success in the report to the store
    ///
    /// Failed writes are counted and logged but do not stop the remaining
    /// writes. Saved ids keep batch order.
    pub async fn persist(&self, report: &BatchReport) -> PersistStats {
        let mut stats = PersistStats::default();
        if report.successes.is_empty() {
            return stats;
        }

        let pb = self
            .show_progress
            .then(|| create_persist_progress_bar(report.successes.len() as u64));

        let results: Vec<_> = stream::iter(&report.successes)
            .map(|quote| {
                let pb = pb.clone();
                async move {
                    let result = self.store.put(&quote.storage_key, &quote.record).await;
                    if let Some(pb) = &pb {
                        pb.set_message(quote.storage_key.to_string());
                        pb.inc(1);
                    }
                    (quote, result)
                }
            })
            .buffered(self.concurrency)
            .collect()
            .await;

        for (quote, result) in results {
            match result {
                Ok(stored) => {
                    debug!("Line {} saved as {}", quote.line_number, stored.id);
                    stats.record_saved(stored.id);
                }
                Err(e) => {
                    error!(
                        "Failed to save line {} ({}): {}",
                        quote.line_number, quote.storage_key, e
                    );
                    stats.record_failure(format!(
                        "line {} ({}): {}",
                        quote.line_number, quote.storage_key, e
                    ));
                }
            }
        }

        if let Some(pb) = pb {
            pb.finish_with_message("done");
        }

        info!("Persisted batch: {}", stats.summary());
        stats
    }
}

fn create_persist_progress_bar(total: u64) -> ProgressBar {
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );
    pb
}
