//! Test utilities for line parser testing
//!
//! This module provides shared fixtures: a fixed parse context, parsers for
//! both policy presets, and a helper that joins fields with tabs.

use chrono::NaiveDate;

use crate::app::models::ParseContext;
use crate::app::services::line_parser::{FieldPolicy, LineParser};
use crate::config::ParserConfig;


/// "Today" used by every test context
pub fn test_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 4, 15).unwrap()
}

/// Context with reference year 2025 and a fixed today
pub fn test_context() -> ParseContext {
    ParseContext::new(2025, test_today())
}

pub fn strict_parser() -> LineParser {
    LineParser::new(FieldPolicy::strict(), ParserConfig::default()).unwrap()
}

pub fn positional_parser() -> LineParser {
    LineParser::new(FieldPolicy::positional(), ParserConfig::default()).unwrap()
}

/// Join fields into a tab-separated line
pub fn tab_line(fields: &[&str]) -> String {
    fields.join("\t")
}

/// The example line from the operator guide
pub fn sample_line() -> String {
    tab_line(&[
        "05월 30일",
        "프란치스코",
        "010-9255-7232",
        "가",
        "동대문구 답십리로 173-4 2층",
        "동대문구 답십리동",
        "금 11시-1시까지",
    ])
}
