//! Integration tests for the batch import pipeline
//!
//! These tests drive the public API end to end: layered configuration, batch
//! parsing, persistence to a directory-backed store, search and reload.

use chrono::NaiveDate;
use quote_importer::app::services::batch_importer::{BatchImporter, import_batch};
use quote_importer::app::services::document_store::{
    DocumentStore, FilesystemStore, search_quotes, store_quote,
};
use quote_importer::app::services::line_parser::PolicyKind;
use quote_importer::{Config, FieldPolicy, LineParser, ParseContext, ParseError, ParseWarning};
use std::io::Write;
use tempfile::TempDir;

const BATCH: &str = "\
05월 30일\t프란치스코\t010-9255-7232\t가\t동대문구 답십리로 173-4 2층\t동대문구 답십리동\t금 11시-1시까지
6/2\t김영희\t010-1111-2222\t사\t강남구 테헤란로 5F\t서초구 반포동 12층

6/3\t박철수
2025-07-01\t미정\t02-555-0101\tX\t종로구 2층
";

fn context() -> ParseContext {
    ParseContext::new(2025, NaiveDate::from_ymd_opt(2025, 4, 15).unwrap())
}

fn parser_for(config: &Config) -> LineParser {
    LineParser::new(FieldPolicy::for_kind(config.import.policy), config.parser.clone()).unwrap()
}

/// Import a mixed batch into a fresh store and read it back
///
/// Purpose: Validate the whole pipeline from pasted text to stored documents
/// Benefit: Catches mismatches between parser output, storage keys and store layout
#[tokio::test]
async fn test_import_batch_into_filesystem_store() {
    let dir = TempDir::new().unwrap();
    let config = Config::default().with_store_root(dir.path().join("quotes"));
    let parser = parser_for(&config);

    let report = import_batch(BATCH, &context(), &parser);
    assert_eq!(report.lines_processed, 4);
    assert_eq!(report.successes.len(), 3);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].line_number, 4);
    assert_eq!(
        report.failures[0].error,
        ParseError::InsufficientFields {
            found: 2,
            required: 3
        }
    );

    let warning_kinds: Vec<&ParseWarning> = report.warnings.iter().map(|w| &w.warning).collect();
    assert_eq!(warning_kinds.len(), 2);
    assert!(report.warnings.iter().all(|w| w.line_number == 5));

    let store = FilesystemStore::open(&config.store.root).await.unwrap();
    let importer = BatchImporter::new(store, config.import.concurrency).unwrap();
    let stats = importer.persist(&report).await;

    assert_eq!(stats.saved, 3);
    assert_eq!(stats.failed, 0);

    let store = importer.store();
    let record = store.load("01092557232.json").await.unwrap();
    assert_eq!(record.moving_date, NaiveDate::from_ymd_opt(2025, 5, 30).unwrap());
    assert_eq!(record.customer_name, "프란치스코");
    assert_eq!(record.customer_phone, "010-9255-7232");
    assert_eq!(record.base_move_type, "가정 이사 🏠");
    assert_eq!(record.from_floor, "2");
    assert_eq!(record.to_floor, "");
    assert_eq!(record.from_method, "사다리차 🪜");

    let office = store.load("01011112222.json").await.unwrap();
    assert_eq!(office.base_move_type, "사무실 이사 🏢");
    assert_eq!(office.from_floor, "5");
    assert_eq!(office.to_floor, "12");

    let fallback = store.load("025550101.json").await.unwrap();
    assert_eq!(fallback.customer_name, "무명");
    assert_eq!(fallback.base_move_type, "가정 이사 🏠");
}

/// Search stored quotes by the last four phone digits
///
/// Purpose: Validate tail search over documents written by a real import
/// Benefit: Ensures the search rule works against actual store file names
#[tokio::test]
async fn test_search_after_import() {
    let dir = TempDir::new().unwrap();
    let config = Config::default();
    let parser = parser_for(&config);

    let report = import_batch(BATCH, &context(), &parser);
    let store = FilesystemStore::open(dir.path()).await.unwrap();
    let importer = BatchImporter::new(store, 2).unwrap();
    importer.persist(&report).await;

    let hits = search_quotes(importer.store(), "7232").await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].name, "01092557232.json");

    let hits = search_quotes(importer.store(), "0101").await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].name, "025550101.json");

    let hits = search_quotes(importer.store(), "010111").await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].name, "01011112222.json");

    assert!(search_quotes(importer.store(), "").await.is_err());
}

/// Save an edited quote back under its sanitized phone number
///
/// Purpose: Validate the single-quote save path against a real store
/// Benefit: Ensures re-saving an imported quote replaces it rather than duplicating it
#[tokio::test]
async fn test_save_edited_quote_replaces_document() {
    let dir = TempDir::new().unwrap();
    let store = FilesystemStore::open(dir.path()).await.unwrap();
    let parser = parser_for(&Config::default());

    let report = import_batch(BATCH, &context(), &parser);
    let importer = BatchImporter::new(store, 1).unwrap();
    importer.persist(&report).await;

    let mut record = importer.store().load("01011112222.json").await.unwrap();
    record.deposit_amount = 50_000;

    let stored = store_quote(importer.store(), record, 9).await.unwrap();
    assert_eq!(stored.name, "01011112222.json");

    let reloaded = importer.store().load("01011112222.json").await.unwrap();
    assert_eq!(reloaded.deposit_amount, 50_000);
    assert_eq!(reloaded.customer_phone, "01011112222");
    assert_eq!(importer.store().find("").await.unwrap().len(), 3);
}

/// Configure the positional policy and custom labels from a TOML file
///
/// Purpose: Validate that file configuration reaches the parser
/// Benefit: Catches serde naming drift between config files and config structs
#[test]
fn test_positional_policy_from_config_file() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(
        file,
        r#"
[import]
policy = "positional"
reference_year = 2026

[parser]
default_customer_name = "고객"
"#
    )
    .unwrap();

    let config = Config::load_layered(Some(file.path())).unwrap();
    assert_eq!(config.import.policy, PolicyKind::Positional);
    assert_eq!(config.import.reference_year, Some(2026));

    let parser = parser_for(&config);
    let ctx = ParseContext::new(2026, NaiveDate::from_ymd_opt(2026, 1, 2).unwrap());
    let report = import_batch("3/1\t\t010-7777-8888", &ctx, &parser);

    assert_eq!(report.successes.len(), 1);
    let record = &report.successes[0].record;
    assert_eq!(record.customer_name, "고객");
    assert_eq!(record.moving_date, NaiveDate::from_ymd_opt(2026, 3, 1).unwrap());
    assert_eq!(record.from_location, "");
}
