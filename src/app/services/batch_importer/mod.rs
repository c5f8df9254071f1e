//! Batch import of pasted quote lines
//!
//! Importing happens in two stages. [`import_batch`] parses every non-blank
//! line of a batch and sorts the outcomes into successes, rejections and
//! warnings without touching storage. [`BatchImporter::persist`] then writes
//! the successes to a [`DocumentStore`](super::document_store::DocumentStore)
//! with bounded concurrency.
//!
//! # Architecture
//!
//! - [`importer`] - Batch parsing and persistence orchestration
//! - [`stats`] - Per-line outcomes and persistence statistics
//!
//! # Example Usage
//!
//! ```rust
//! use quote_importer::app::services::batch_importer::import_batch;
//! use quote_importer::config::ParserConfig;
//! use quote_importer::{FieldPolicy, LineParser, ParseContext};
//! use chrono::NaiveDate;
//!
//! let parser = LineParser::new(FieldPolicy::strict(), ParserConfig::default()).unwrap();
//! let ctx = ParseContext::new(2025, NaiveDate::from_ymd_opt(2025, 4, 15).unwrap());
//!
//! let text = "5/30\t홍길동\t010-1111-2222\t가\t서울 마포구 3층\n\n5/31\t김영희";
//! let report = import_batch(text, &ctx, &parser);
//!
//! assert_eq!(report.successes.len(), 1);
//! assert_eq!(report.failures.len(), 1);
//! assert_eq!(report.failures[0].line_number, 3);
//! ```

pub mod importer;
pub mod stats;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use importer::{BatchImporter, import_batch};
pub use stats::{BatchReport, ImportedQuote, LineRejection, LineWarning, PersistStats};
