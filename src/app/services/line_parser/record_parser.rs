//! Line orchestration and error policy
//!
//! Hard failures are checked first so a rejected line never produces warnings
//! or a partially populated record. Soft anomalies are collected on the
//! [`ParsedLine`] and logged as they occur.

use super::date_normalizer::DateNormalizer;
use super::field_parsers::{
    FloorExtractor, parse_customer_name, parse_special_notes, resolve_move_type,
};
use super::phone::normalize_phone;
use super::policy::FieldPolicy;
use super::tokenizer::{field_at, tokenize};
use crate::Result;
use crate::app::models::{ParseContext, ParseWarning, QuoteRecord, StorageKey};
use crate::config::ParserConfig;
use crate::constants::slots;
use serde::Serialize;
use tracing::{debug, warn};

/// Hard failures that reject a line
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParseError {
    /// The line has fewer tokens than the policy minimum
    #[error("insufficient fields: found {found}, at least {required} required")]
    InsufficientFields { found: usize, required: usize },

    /// The phone slot is absent or contains no digits
    #[error("customer phone is missing or contains no digits")]
    MissingOrInvalidPhone,

    /// The policy requires an origin address and none was given
    #[error("origin address is required")]
    MissingRequiredAddress,
}

/// A successfully parsed line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedLine {
    pub record: QuoteRecord,
    pub storage_key: StorageKey,
    pub warnings: Vec<ParseWarning>,
}

/// Parser for one batch line, configured by a field policy
///
/// Holds only compiled patterns and immutable configuration, so a single
/// instance can be shared across threads.
#[derive(Debug, Clone)]
pub struct LineParser {
    policy: FieldPolicy,
    config: ParserConfig,
    dates: DateNormalizer,
    floors: FloorExtractor,
}

impl LineParser {
    /// Create a parser; fails if the configuration is invalid
    pub fn new(policy: FieldPolicy, config: ParserConfig) -> Result<Self> {
        config.validate()?;

        let dates = DateNormalizer::new(config.undecided_placeholder.clone())?;
        let floors = FloorExtractor::new(&config.floor_units)?;

        debug!(
            "Line parser ready: policy={}, min_fields={}, require_from_location={}",
            policy.kind, policy.min_fields, policy.require_from_location
        );

        Ok(Self {
            policy,
            config,
            dates,
            floors,
        })
    }

    pub fn policy(&self) -> &FieldPolicy {
        &self.policy
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse one line into a record and storage key
    pub fn parse_line(
        &self,
        line: &str,
        ctx: &ParseContext,
    ) -> std::result::Result<ParsedLine, ParseError> {
        let tokens = tokenize(line, &self.policy);

        if tokens.len() < self.policy.min_fields {
            return Err(ParseError::InsufficientFields {
                found: tokens.len(),
                required: self.policy.min_fields,
            });
        }

        let phone = field_at(&tokens, slots::CUSTOMER_PHONE)
            .ok_or(ParseError::MissingOrInvalidPhone)?;
        let digits = normalize_phone(phone).ok_or(ParseError::MissingOrInvalidPhone)?;
        let storage_key =
            StorageKey::from_digits(&digits).ok_or(ParseError::MissingOrInvalidPhone)?;

        let from_location = field_at(&tokens, slots::FROM_LOCATION);
        if self.policy.require_from_location && from_location.is_none() {
            return Err(ParseError::MissingRequiredAddress);
        }

        let mut warnings = Vec::new();

        let date_token = field_at(&tokens, slots::DATE).unwrap_or_default();
        let date = self
            .dates
            .normalize(date_token, ctx, self.policy.date_matching);
        warnings.extend(date.warning);

        let mut record = QuoteRecord::with_defaults(
            date.date,
            phone,
            self.config.default_move_type.clone(),
            self.config.default_method(),
        );

        let (name, name_warning) =
            parse_customer_name(field_at(&tokens, slots::CUSTOMER_NAME), &self.config);
        record.customer_name = name;
        warnings.extend(name_warning);

        let (move_type, move_type_warning) =
            resolve_move_type(field_at(&tokens, slots::MOVE_TYPE), &self.config);
        record.base_move_type = move_type;
        warnings.extend(move_type_warning);

        if let Some(address) = from_location {
            record.from_location = address.to_string();
            record.from_floor = self.floors.extract(address).unwrap_or_default();
        }

        if let Some(address) = field_at(&tokens, slots::TO_LOCATION) {
            record.to_location = address.to_string();
            record.to_floor = self.floors.extract(address).unwrap_or_default();
        }

        record.special_notes = parse_special_notes(field_at(&tokens, slots::SPECIAL_NOTES));

        for warning in &warnings {
            warn!("{}: {}", storage_key, warning);
        }

        debug!(
            "Parsed line into {} (date={}, move_type={})",
            storage_key, record.moving_date, record.base_move_type
        );

        Ok(ParsedLine {
            record,
            storage_key,
            warnings,
        })
    }
}
