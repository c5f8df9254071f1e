//! Test utilities for document store testing
//!
//! Provides an in-memory store used to exercise code written against the
//! [`DocumentStore`] contract, plus record fixtures.

use std::collections::BTreeMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::NaiveDate;

use crate::app::models::{QuoteRecord, StorageKey};
use crate::app::services::document_store::{DocumentStore, StoredDocument};
use crate::{Error, Result};


/// In-memory store; can be told to fail writes for specific keys
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: Mutex<BTreeMap<String, QuoteRecord>>,
    failing_keys: Vec<String>,
    puts: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store whose writes fail for the given key names
    pub fn failing_on(keys: &[&str]) -> Self {
        Self {
            failing_keys: keys.iter().map(|k| k.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.documents.lock().unwrap().len()
    }

    pub fn get(&self, name: &str) -> Option<QuoteRecord> {
        self.documents.lock().unwrap().get(name).cloned()
    }

    /// Number of put calls, including failed ones
    pub fn put_calls(&self) -> usize {
        self.puts.load(Ordering::SeqCst)
    }
}

impl DocumentStore for MemoryStore {
    async fn put(&self, key: &StorageKey, record: &QuoteRecord) -> Result<StoredDocument> {
        self.puts.fetch_add(1, Ordering::SeqCst);
        if self.failing_keys.iter().any(|k| k == key.as_str()) {
            return Err(Error::store(format!("simulated write failure for {}", key)));
        }
        self.documents
            .lock()
            .unwrap()
            .insert(key.to_string(), record.clone());
        Ok(StoredDocument {
            name: key.to_string(),
            id: key.to_string(),
        })
    }

    async fn find(&self, query: &str) -> Result<Vec<StoredDocument>> {
        Ok(self
            .documents
            .lock()
            .unwrap()
            .keys()
            .filter(|name| name.contains(query))
            .map(|name| StoredDocument {
                name: name.clone(),
                id: name.clone(),
            })
            .collect())
    }

    async fn load(&self, id: &str) -> Result<QuoteRecord> {
        self.get(id).ok_or_else(|| Error::document_not_found(id))
    }
}

/// A record with the given phone and otherwise default fields
pub fn sample_record(phone: &str) -> QuoteRecord {
    let mut record = QuoteRecord::with_defaults(
        NaiveDate::from_ymd_opt(2025, 5, 30).unwrap(),
        phone,
        "가정 이사 🏠",
        "사다리차 🪜",
    );
    record.customer_name = "프란치스코".to_string();
    record.from_location = "동대문구 답십리로 173-4 2층".to_string();
    record.from_floor = "2".to_string();
    record
}

pub fn key(digits: &str) -> StorageKey {
    StorageKey::from_digits(digits).unwrap()
}
