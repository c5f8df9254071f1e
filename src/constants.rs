//! Application constants for the quote importer
//!
//! This module contains the field layout, placeholder tokens, default labels
//! and storage conventions shared by the parser, importer and store.

// =============================================================================
// Line Layout
// =============================================================================

/// Field delimiter for batch lines
pub const FIELD_DELIMITER: char = '\t';

/// Positional slots of a batch line
pub mod slots {
    pub const DATE: usize = 0;
    pub const CUSTOMER_NAME: usize = 1;
    pub const CUSTOMER_PHONE: usize = 2;
    pub const MOVE_TYPE: usize = 3;
    pub const FROM_LOCATION: usize = 4;
    pub const TO_LOCATION: usize = 5;
    pub const SPECIAL_NOTES: usize = 6;

    /// Number of meaningful slots in a line
    pub const COUNT: usize = 7;
}

/// Minimum token count after empty tokens are dropped (date, name, phone)
pub const STRICT_MIN_FIELDS: usize = 3;

/// Minimum token count when empty tokens keep their slot
pub const POSITIONAL_MIN_FIELDS: usize = 1;

/// Number of characters of a rejected line echoed back in reports
pub const REJECTION_FRAGMENT_CHARS: usize = 30;

// =============================================================================
// Placeholders and Defaults
// =============================================================================

/// Placeholder token meaning "not decided yet" for dates and names
pub const UNDECIDED_PLACEHOLDER: &str = "미정";

/// Customer name used when the name is absent or undecided
pub const DEFAULT_CUSTOMER_NAME: &str = "무명";

/// Household move label and its short code
pub const HOUSEHOLD_MOVE_LABEL: &str = "가정 이사 🏠";
pub const HOUSEHOLD_MOVE_CODE: char = '가';

/// Office move label and its short code
pub const OFFICE_MOVE_LABEL: &str = "사무실 이사 🏢";
pub const OFFICE_MOVE_CODE: char = '사';

/// Loading method assigned to both ends of a freshly imported quote
pub const DEFAULT_METHOD: &str = "사다리차 🪜";

/// Floor unit markers recognized at the end of an address
pub const FLOOR_UNITS: &[&str] = &["층", "F", "f"];

/// Particles that may trail a Korean month/day phrase
pub const DATE_TRAILING_PARTICLES: &[&str] = &["에", "경", "쯤"];

// =============================================================================
// Time
// =============================================================================

/// Korea Standard Time offset from UTC in seconds (UTC+9, no daylight saving)
pub const KST_OFFSET_SECONDS: i32 = 9 * 3600;

/// Century added to two-digit years
pub const TWO_DIGIT_YEAR_BASE: i32 = 2000;

// =============================================================================
// Storage
// =============================================================================

/// File extension appended to the digits-only phone to form a storage key
pub const STORAGE_KEY_SUFFIX: &str = ".json";

/// Minimum number of digits for a phone number saved outside the bulk importer
pub const MIN_SAVE_PHONE_DIGITS: usize = 9;

/// Length of a "last digits" search term
pub const PHONE_TAIL_SEARCH_LEN: usize = 4;

/// Application directory name used under the user's config/data directories
pub const APP_DIR_NAME: &str = "quote-importer";

/// Subdirectory of the data directory holding quote documents
pub const QUOTES_DIR_NAME: &str = "quotes";

/// Config file name inside the config directory
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Environment variable prefix for configuration overrides
pub const ENV_PREFIX: &str = "QUOTE_IMPORTER";

// =============================================================================
// Import
// =============================================================================

/// Upper bound on concurrent store writes during an import
pub const MAX_STORE_CONCURRENCY: usize = 64;

/// Default number of concurrent store writes
pub fn default_store_concurrency() -> usize {
    num_cpus::get().clamp(1, 8)
}

/// Build the storage key file name for a digits-only phone number
pub fn storage_file_name(digits: &str) -> String {
    format!("{}{}", digits, STORAGE_KEY_SUFFIX)
}
