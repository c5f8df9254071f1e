//! Per-field validators and defaulters
//!
//! Each helper takes the (possibly absent) token for one slot and returns the
//! value to store plus an optional soft-anomaly warning. None of them fail.

use crate::app::models::ParseWarning;
use crate::config::ParserConfig;
use crate::{Error, Result};
use regex::Regex;

/// Resolve the customer name, substituting the default for absent or undecided names
pub fn parse_customer_name(
    token: Option<&str>,
    config: &ParserConfig,
) -> (String, Option<ParseWarning>) {
    match token {
        None => (
            config.default_customer_name.clone(),
            Some(ParseWarning::MissingCustomerName {
                fallback: config.default_customer_name.clone(),
            }),
        ),
        Some(name) if name.to_lowercase() == config.undecided_placeholder.to_lowercase() => (
            config.default_customer_name.clone(),
            Some(ParseWarning::PlaceholderCustomerName {
                token: name.to_string(),
                fallback: config.default_customer_name.clone(),
            }),
        ),
        Some(name) => (name.to_string(), None),
    }
}

/// Resolve a move type code to its label
///
/// An absent code silently selects the default; an unrecognized code selects
/// the default with a warning.
pub fn resolve_move_type(
    token: Option<&str>,
    config: &ParserConfig,
) -> (String, Option<ParseWarning>) {
    let Some(code) = token else {
        return (config.default_move_type.clone(), None);
    };

    let lowered = code.to_lowercase();
    let matched = (code.chars().count() == 1)
        .then(|| {
            config
                .move_types
                .iter()
                .find(|option| option.code.to_lowercase() == lowered)
        })
        .flatten();

    match matched {
        Some(option) => (option.label.clone(), None),
        None => (
            config.default_move_type.clone(),
            Some(ParseWarning::UnrecognizedMoveType {
                code: code.to_string(),
                fallback: config.default_move_type.clone(),
            }),
        ),
    }
}

/// Extracts a trailing floor number such as `2층` or `3F` from an address
#[derive(Debug, Clone)]
pub struct FloorExtractor {
    pattern: Regex,
}

impl FloorExtractor {
    /// Build an extractor for the given unit markers
    pub fn new(units: &[String]) -> Result<Self> {
        if units.is_empty() {
            return Err(Error::configuration("No floor units configured"));
        }

        let alternatives = units
            .iter()
            .map(|unit| regex::escape(unit))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = format!(r"([0-9]+)\s*(?:{})$", alternatives);

        let pattern = Regex::new(&pattern).map_err(|e| {
            Error::configuration(format!("Invalid floor pattern '{}': {}", pattern, e))
        })?;

        Ok(Self { pattern })
    }

    /// Floor digits at the end of the address; the address itself is not modified
    pub fn extract(&self, address: &str) -> Option<String> {
        self.pattern
            .captures(address.trim_end())
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }
}

/// Notes are stored verbatim; absent notes become an empty string
pub fn parse_special_notes(token: Option<&str>) -> String {
    token.map(str::to_string).unwrap_or_default()
}
