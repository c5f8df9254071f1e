//! Data models for quote importing
//!
//! This module contains the quote document persisted by the store, the storage
//! key derived from it, the request-scoped parse context, and the soft anomalies
//! reported while normalizing a line.

use crate::app::services::line_parser::phone::ascii_digits;
use crate::constants::{self, KST_OFFSET_SECONDS};
use chrono::{Datelike, Duration, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

// =============================================================================
// Quote Record Structure
// =============================================================================

/// Quote document shared with the quote entry form
///
/// Field names follow the JSON keys the form already reads and writes, so a
/// record produced by the importer can be opened and edited there unchanged.
/// Loading is lenient: a missing key takes the same default the form uses, and
/// a missing or unreadable moving date becomes today's date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteRecord {
    /// Moving date (ISO `YYYY-MM-DD`)
    #[serde(default = "today_kst", deserialize_with = "deserialize_moving_date")]
    pub moving_date: NaiveDate,

    /// Customer name, or the default name when unknown
    #[serde(default = "default_customer_name")]
    pub customer_name: String,

    /// Phone number exactly as typed, kept for display
    #[serde(default)]
    pub customer_phone: String,

    /// Long-form move type label (e.g. "가정 이사 🏠")
    #[serde(default = "default_move_type")]
    pub base_move_type: String,

    /// Origin address, including any floor marker
    #[serde(default)]
    pub from_location: String,

    /// Destination address, including any floor marker
    #[serde(default)]
    pub to_location: String,

    /// Free-form notes from the end of the line
    #[serde(default)]
    pub special_notes: String,

    #[serde(default)]
    pub is_storage_move: bool,

    #[serde(default)]
    pub apply_long_distance: bool,

    #[serde(default)]
    pub has_via_point: bool,

    /// Origin floor digits extracted from the address
    #[serde(default)]
    pub from_floor: String,

    /// Destination floor digits extracted from the address
    #[serde(default)]
    pub to_floor: String,

    /// Loading method at the origin
    #[serde(default)]
    pub from_method: String,

    /// Loading method at the destination
    #[serde(default)]
    pub to_method: String,

    #[serde(default)]
    pub deposit_amount: i64,

    #[serde(default)]
    pub adjustment_amount: i64,

    #[serde(default)]
    pub issue_tax_invoice: bool,

    #[serde(default)]
    pub card_payment: bool,

    #[serde(default)]
    pub remove_base_housewife: bool,

    #[serde(default)]
    pub dispatched_1t: u32,

    #[serde(default)]
    pub dispatched_2_5t: u32,

    #[serde(default)]
    pub dispatched_3_5t: u32,

    #[serde(default)]
    pub dispatched_5t: u32,

    /// Paths of images attached through the form
    #[serde(default, deserialize_with = "deserialize_image_paths")]
    pub uploaded_image_paths: Vec<String>,

    /// Keys written by the form that the importer does not model (item quantities etc.)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl QuoteRecord {
    /// Create a record with every derived-from-line field empty and every
    /// option at its default
    pub fn with_defaults(
        moving_date: NaiveDate,
        customer_phone: impl Into<String>,
        base_move_type: impl Into<String>,
        method: impl Into<String>,
    ) -> Self {
        let method = method.into();
        Self {
            moving_date,
            customer_name: constants::DEFAULT_CUSTOMER_NAME.to_string(),
            customer_phone: customer_phone.into(),
            base_move_type: base_move_type.into(),
            from_location: String::new(),
            to_location: String::new(),
            special_notes: String::new(),
            is_storage_move: false,
            apply_long_distance: false,
            has_via_point: false,
            from_floor: String::new(),
            to_floor: String::new(),
            from_method: method.clone(),
            to_method: method,
            deposit_amount: 0,
            adjustment_amount: 0,
            issue_tax_invoice: false,
            card_payment: false,
            remove_base_housewife: false,
            dispatched_1t: 0,
            dispatched_2_5t: 0,
            dispatched_3_5t: 0,
            dispatched_5t: 0,
            uploaded_image_paths: Vec::new(),
            extra: Map::new(),
        }
    }

    /// Digits-only form of the customer phone
    pub fn phone_digits(&self) -> String {
        ascii_digits(&self.customer_phone)
    }

    /// Storage key for this record, if the phone contains any digits
    pub fn storage_key(&self) -> Option<StorageKey> {
        StorageKey::from_digits(&self.phone_digits())
    }
}

fn default_customer_name() -> String {
    constants::DEFAULT_CUSTOMER_NAME.to_string()
}

fn default_move_type() -> String {
    constants::HOUSEHOLD_MOVE_LABEL.to_string()
}

/// Accept a null or unreadable moving date as today's date
fn deserialize_moving_date<'de, D>(deserializer: D) -> std::result::Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value
        .as_str()
        .and_then(|text| NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d").ok())
        .unwrap_or_else(today_kst))
}

/// Accept a missing, null or malformed image list as empty
fn deserialize_image_paths<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(path) => Some(path),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}

// =============================================================================
// Storage Key
// =============================================================================

/// Identity of a quote document in the store: digits-only phone + ".json"
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StorageKey(String);

impl StorageKey {
    /// Build a key from a digits-only phone number
    ///
    /// Returns `None` when `digits` is empty or contains anything but ASCII digits.
    pub fn from_digits(digits: &str) -> Option<Self> {
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        Some(Self(constants::storage_file_name(digits)))
    }

    /// The full file name, e.g. `01092557232.json`
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The phone digits the key was derived from
    pub fn digits(&self) -> &str {
        self.0
            .strip_suffix(constants::STORAGE_KEY_SUFFIX)
            .unwrap_or(&self.0)
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for StorageKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// =============================================================================
// Parse Context
// =============================================================================

/// Request-scoped inputs for parsing: the year assumed for month/day phrases
/// and the date used whenever a moving date cannot be determined
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseContext {
    pub reference_year: i32,
    pub today: NaiveDate,
}

impl ParseContext {
    /// Create a context with an explicit reference year and "today"
    pub fn new(reference_year: i32, today: NaiveDate) -> Self {
        Self {
            reference_year,
            today,
        }
    }

    /// Context for the current date in Korea, using its year as the reference year
    pub fn now() -> Self {
        let today = today_kst();
        Self::new(today.year(), today)
    }

    /// Context for the current date in Korea with an overridden reference year
    pub fn now_with_year(reference_year: i32) -> Self {
        Self::new(reference_year, today_kst())
    }
}

/// Current calendar date in Asia/Seoul (UTC+9, no daylight saving)
pub fn today_kst() -> NaiveDate {
    (Utc::now() + Duration::seconds(i64::from(KST_OFFSET_SECONDS))).date_naive()
}

// =============================================================================
// Soft Anomalies
// =============================================================================

/// A recoverable issue resolved by substituting a default value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParseWarning {
    /// The date token matched no known format
    UnrecognizedDate { token: String },

    /// The date token matched a format but names no real calendar day
    InvalidCalendarDate { token: String },

    /// The move type code is not one of the configured codes
    UnrecognizedMoveType { code: String, fallback: String },

    /// The line carries no customer name
    MissingCustomerName { fallback: String },

    /// The customer name is the undecided placeholder
    PlaceholderCustomerName { token: String, fallback: String },
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnrecognizedDate { token } => {
                write!(f, "unrecognized date '{}', using today's date", token)
            }
            Self::InvalidCalendarDate { token } => {
                write!(f, "'{}' is not a valid calendar date, using today's date", token)
            }
            Self::UnrecognizedMoveType { code, fallback } => {
                write!(f, "unrecognized move type code '{}', using '{}'", code, fallback)
            }
            Self::MissingCustomerName { fallback } => {
                write!(f, "customer name missing, using '{}'", fallback)
            }
            Self::PlaceholderCustomerName { token, fallback } => write!(
                f,
                "customer name '{}' is a placeholder, using '{}'",
                token, fallback
            ),
        }
    }
}
