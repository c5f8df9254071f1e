//! Line parser for tab-separated moving-quote batches
//!
//! This module turns one loosely structured batch line into a validated
//! [`QuoteRecord`](crate::app::models::QuoteRecord) and its storage key, or a
//! rejection explaining why the line cannot be stored.
//!
//! ## Architecture
//!
//! The parser is organized into sequential, pure stages:
//! - [`tokenizer`] - Splits a line on tabs under a strict or positional policy
//! - [`date_normalizer`] - Maps Korean and numeric date phrases to ISO dates
//! - [`field_parsers`] - Per-field defaulting: name, move type, floors, notes
//! - [`phone`] - Digits-only phone normalization
//! - [`record_parser`] - Orchestration and the hard-failure error policy
//! - [`policy`] - Field policy presets selecting tokenization and requirements
//!
//! Hard failures (`InsufficientFields`, `MissingOrInvalidPhone`,
//! `MissingRequiredAddress`) reject the line. Everything else degrades to a
//! default value and is reported as a [`ParseWarning`](crate::app::models::ParseWarning).
//!
//! ## Usage
//!
//! ```rust
//! use quote_importer::app::models::ParseContext;
//! use quote_importer::app::services::line_parser::{FieldPolicy, LineParser};
//! use quote_importer::config::ParserConfig;
//! use chrono::NaiveDate;
//!
//! # fn example() -> quote_importer::Result<()> {
//! let parser = LineParser::new(FieldPolicy::strict(), ParserConfig::default())?;
//! let ctx = ParseContext::new(2025, NaiveDate::from_ymd_opt(2025, 5, 1).unwrap());
//!
//! let parsed = parser
//!     .parse_line("05월 30일\t프란치스코\t010-9255-7232\t가\t답십리로 173-4 2층\t답십리동", &ctx)
//!     .expect("line is valid");
//!
//! assert_eq!(parsed.storage_key.as_str(), "01092557232.json");
//! assert_eq!(parsed.record.from_floor, "2");
//! # Ok(())
//! # }
//! ```

pub mod date_normalizer;
pub mod field_parsers;
pub mod phone;
pub mod policy;
pub mod record_parser;
pub mod tokenizer;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use date_normalizer::{DateNormalizer, DateOutcome};
pub use policy::{DateMatching, FieldPolicy, PolicyKind};
pub use record_parser::{LineParser, ParseError, ParsedLine};
pub use tokenizer::tokenize;
