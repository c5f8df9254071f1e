//! Phone-number search and single-quote saving

use super::{DocumentStore, StoredDocument};
use crate::app::models::{QuoteRecord, StorageKey};
use crate::app::services::line_parser::phone::sanitize_phone_for_save;
use crate::constants::PHONE_TAIL_SEARCH_LEN;
use crate::{Error, Result};
use std::path::Path;
use tracing::{debug, info};

/// Search stored quotes by full phone number or its last four digits
///
/// A four-digit term only keeps documents whose name (without extension) ends
/// with those digits; any other term keeps every document whose name contains it.
pub async fn search_quotes<S: DocumentStore>(store: &S, term: &str) -> Result<Vec<StoredDocument>> {
    let term = term.trim();
    if term.is_empty() {
        return Err(Error::data_validation("Search term cannot be empty"));
    }

    let results = store.find(term).await?;

    let is_tail_search =
        term.len() == PHONE_TAIL_SEARCH_LEN && term.chars().all(|c| c.is_ascii_digit());
    if !is_tail_search {
        return Ok(results);
    }

    let filtered: Vec<StoredDocument> = results
        .into_iter()
        .filter(|doc| {
            Path::new(&doc.name)
                .file_stem()
                .and_then(|stem| stem.to_str())
                .is_some_and(|stem| stem.ends_with(term))
        })
        .collect();

    debug!("Tail search '{}' kept {} documents", term, filtered.len());
    Ok(filtered)
}

/// Save a single quote under the key derived from its phone number
///
/// The stored phone is replaced by its digits-only form, which must have at
/// least `min_digits` digits.
pub async fn store_quote<S: DocumentStore>(
    store: &S,
    mut record: QuoteRecord,
    min_digits: usize,
) -> Result<StoredDocument> {
    let digits = sanitize_phone_for_save(&record.customer_phone, min_digits)?;
    let key = StorageKey::from_digits(&digits)
        .ok_or_else(|| Error::data_validation("Phone number produced an empty storage key"))?;

    record.customer_phone = digits;
    let stored = store.put(&key, &record).await?;
    info!("Saved quote {}", stored.name);
    Ok(stored)
}
