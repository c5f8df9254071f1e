//! Document store for quote records
//!
//! The store is the only part of the importer that performs I/O. It persists
//! one JSON document per [`StorageKey`](crate::app::models::StorageKey) and can
//! list and load documents by name.
//!
//! ## Architecture
//!
//! - [`DocumentStore`] - The contract the importer and CLI depend on
//! - [`filesystem`] - A directory-backed implementation, one file per key
//! - [`search`] - Phone-number search and single-quote saving on top of any store

pub mod filesystem;
pub mod search;

#[cfg(test)]
pub mod tests;

use crate::Result;
use crate::app::models::{QuoteRecord, StorageKey};
use serde::{Deserialize, Serialize};
use std::future::Future;

// Re-export main types for easy access
pub use filesystem::FilesystemStore;
pub use search::{search_quotes, store_quote};

/// A document listed by the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredDocument {
    /// Document name (the storage key file name)
    pub name: String,
    /// Store-specific identifier used to load the document
    pub id: String,
}

/// Persistence contract for quote documents
///
/// Writing a key that already exists replaces the previous document.
pub trait DocumentStore {
    /// Persist a record under its storage key
    fn put(
        &self,
        key: &StorageKey,
        record: &QuoteRecord,
    ) -> impl Future<Output = Result<StoredDocument>> + Send;

    /// List documents whose name contains `query`, ordered by name
    fn find(&self, query: &str) -> impl Future<Output = Result<Vec<StoredDocument>>> + Send;

    /// Load a document by identifier
    fn load(&self, id: &str) -> impl Future<Output = Result<QuoteRecord>> + Send;
}
