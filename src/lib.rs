//! Quote Importer Library
//!
//! A Rust library for turning loosely structured, tab-separated moving-quote
//! lines into validated JSON quote documents keyed by the customer's phone number.
//!
//! This library provides tools for:
//! - Tokenizing batch lines under a strict or positional field policy
//! - Normalizing Korean and numeric date phrases to ISO dates
//! - Defaulting and validating customer, move-type and address fields
//! - Deriving storage keys from phone numbers
//! - Importing whole batches with per-line outcomes and accumulated warnings
//! - Persisting and searching quote documents in a document store

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod batch_importer;
        pub mod document_store;
        pub mod line_parser;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
    pub mod input;
}

// Re-export commonly used types
pub use app::models::{ParseContext, ParseWarning, QuoteRecord, StorageKey};
pub use app::services::line_parser::{FieldPolicy, LineParser, ParseError, ParsedLine};
pub use config::Config;

/// Result type alias for the quote importer
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for importer operations outside the per-line parse boundary
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// JSON (de)serialization failed
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Document store error
    #[error("Document store error: {message}")]
    Store { message: String },

    /// Document not found in the store
    #[error("Document not found: {id}")]
    DocumentNotFound { id: String },

    /// Data validation error
    #[error("Data validation error: {message}")]
    DataValidation { message: String },

    /// Processing interrupted
    #[error("Processing interrupted: {reason}")]
    ProcessingInterrupted { reason: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a JSON error with context
    pub fn json(message: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Json {
            message: message.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a document store error
    pub fn store(message: impl Into<String>) -> Self {
        Self::Store {
            message: message.into(),
        }
    }

    /// Create a document not found error
    pub fn document_not_found(id: impl Into<String>) -> Self {
        Self::DocumentNotFound { id: id.into() }
    }

    /// Create a data validation error
    pub fn data_validation(message: impl Into<String>) -> Self {
        Self::DataValidation {
            message: message.into(),
        }
    }

    /// Create a processing interrupted error
    pub fn processing_interrupted(reason: impl Into<String>) -> Self {
        Self::ProcessingInterrupted {
            reason: reason.into(),
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Json {
            message: "JSON processing failed".to_string(),
            source: error,
        }
    }
}

impl From<::config::ConfigError> for Error {
    fn from(error: ::config::ConfigError) -> Self {
        Self::Configuration {
            message: error.to_string(),
        }
    }
}
