//! Test utilities for batch importer testing

use chrono::NaiveDate;

use crate::app::models::ParseContext;
use crate::app::services::line_parser::{FieldPolicy, LineParser};
use crate::config::ParserConfig;

mod stats_tests;

pub fn test_context() -> ParseContext {
    ParseContext::new(2025, NaiveDate::from_ymd_opt(2025, 4, 15).unwrap())
}

pub fn strict_parser() -> LineParser {
    LineParser::new(FieldPolicy::strict(), ParserConfig::default()).unwrap()
}

pub fn positional_parser() -> LineParser {
    LineParser::new(FieldPolicy::positional(), ParserConfig::default()).unwrap()
}

/// Three good lines, one short line and one without a phone, with blank lines between
pub fn mixed_batch() -> String {
    [
        "05월 30일\t프란치스코\t010-9255-7232\t가\t동대문구 답십리로 173-4 2층\t동대문구 답십리동\t금 11시-1시까지",
        "",
        "6/2\t김영희\t010-1111-2222\t사\t강남구 테헤란로 5F",
        "6/3\t박철수",
        "   ",
        "내일\t이민수\t없음\t가\t마포구 합정동",
        "2025-07-01\t미정\t02-555-0101\t가\t종로구 2층",
    ]
    .join("\n")
}
