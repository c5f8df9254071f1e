//! Tests for report and persistence statistics

use crate::app::services::batch_importer::stats::line_fragment;
use crate::app::services::batch_importer::{BatchReport, PersistStats};

#[test]
fn test_empty_report_success_rate() {
    let report = BatchReport::default();
    assert_eq!(report.success_rate(), 100.0);
    assert!(report.is_clean());
}

#[test]
fn test_summary_mentions_counts() {
    let report = BatchReport {
        lines_processed: 4,
        ..Default::default()
    };
    assert_eq!(
        report.summary(),
        "4 lines: 0 parsed, 0 rejected, 0 warnings (0.0% success)"
    );
}

#[test]
fn test_persist_stats_accumulate() {
    let mut stats = PersistStats::default();
    stats.record_saved("01011112222.json".to_string());
    stats.record_failure("line 2: disk full".to_string());
    stats.record_saved("01033334444.json".to_string());

    assert_eq!(stats.attempted, 3);
    assert_eq!(stats.saved, 2);
    assert_eq!(stats.failed, 1);
    assert_eq!(stats.summary(), "3 attempted: 2 saved, 1 failed");
}

#[test]
fn test_short_lines_are_kept_whole() {
    assert_eq!(line_fragment("6/3\t박철수"), "6/3\t박철수");
    assert_eq!(line_fragment(""), "");
}
