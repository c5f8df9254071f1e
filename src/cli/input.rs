//! Reading batch text and quote documents from files or standard input

use crate::app::models::QuoteRecord;
use anyhow::{Context, Result};
use std::io::Read;
use std::path::Path;

/// Read a whole batch from `path`, or from standard input when `None`
pub fn read_batch_text(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read batch file {}", path.display())),
        None => read_stdin(),
    }
}

/// Read a single JSON quote document from `path`, or from standard input
pub fn read_quote_record(path: Option<&Path>) -> Result<QuoteRecord> {
    let text = read_batch_text(path)?;
    let source = path
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "standard input".to_string());

    serde_json::from_str(&text).with_context(|| format!("Invalid quote document in {}", source))
}

fn read_stdin() -> Result<String> {
    let mut text = String::new();
    std::io::stdin()
        .read_to_string(&mut text)
        .context("Failed to read standard input")?;
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_batch_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "5/30\t홍길동\t010-1111-2222\n6/1\t김영희\t010-3333-4444").unwrap();

        let text = read_batch_text(Some(file.path())).unwrap();
        assert_eq!(text.lines().count(), 2);
    }

    #[test]
    fn test_missing_batch_file_names_path() {
        let err = read_batch_text(Some(Path::new("/definitely/missing.tsv"))).unwrap_err();
        assert!(format!("{:#}", err).contains("/definitely/missing.tsv"));
    }

    #[test]
    fn test_read_quote_record() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "moving_date": "2025-05-30",
                "customer_name": "홍길동",
                "customer_phone": "010-1111-2222",
                "base_move_type": "가정 이사 🏠"
            }}"#
        )
        .unwrap();

        let record = read_quote_record(Some(file.path())).unwrap();
        assert_eq!(record.customer_name, "홍길동");
        assert_eq!(record.from_method, "");
    }

    #[test]
    fn test_malformed_quote_record() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let err = read_quote_record(Some(file.path())).unwrap_err();
        assert!(err.to_string().contains("Invalid quote document"));
    }
}
