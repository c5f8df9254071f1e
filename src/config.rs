//! Configuration management and validation.
//!
//! Provides configuration structures for the line parser, the document store
//! and batch imports. Configuration is layered: built-in defaults, then an
//! optional TOML file, then `QUOTE_IMPORTER__*` environment variables, then
//! CLI overrides applied by the command layer.

use crate::app::services::line_parser::PolicyKind;
use crate::constants::{
    self, APP_DIR_NAME, CONFIG_FILE_NAME, ENV_PREFIX, MAX_STORE_CONCURRENCY, QUOTES_DIR_NAME,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A move type short code and the label it selects
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveTypeOption {
    /// Single-character code typed in batch lines (compared case-insensitively)
    pub code: String,
    /// Long-form label stored in the quote document
    pub label: String,
}

impl MoveTypeOption {
    pub fn new(code: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            label: label.into(),
        }
    }
}

/// Parser-level options: defaults and recognized vocabularies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Name stored when the name is absent or undecided
    pub default_customer_name: String,

    /// Token meaning "not decided yet" for dates and names
    pub undecided_placeholder: String,

    /// The two recognized move type codes
    pub move_types: Vec<MoveTypeOption>,

    /// Label used for an absent or unrecognized move type code
    pub default_move_type: String,

    /// Loading method options, the first is assigned to new quotes
    pub method_options: Vec<String>,

    /// Floor unit markers recognized at the end of an address
    pub floor_units: Vec<String>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            default_customer_name: constants::DEFAULT_CUSTOMER_NAME.to_string(),
            undecided_placeholder: constants::UNDECIDED_PLACEHOLDER.to_string(),
            move_types: vec![
                MoveTypeOption::new(
                    constants::HOUSEHOLD_MOVE_CODE.to_string(),
                    constants::HOUSEHOLD_MOVE_LABEL,
                ),
                MoveTypeOption::new(
                    constants::OFFICE_MOVE_CODE.to_string(),
                    constants::OFFICE_MOVE_LABEL,
                ),
            ],
            default_move_type: constants::HOUSEHOLD_MOVE_LABEL.to_string(),
            method_options: vec![constants::DEFAULT_METHOD.to_string()],
            floor_units: constants::FLOOR_UNITS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl ParserConfig {
    /// Validate option lists and codes; called before a parser is built
    pub fn validate(&self) -> Result<()> {
        if self.default_customer_name.trim().is_empty() {
            return Err(Error::configuration(
                "Default customer name cannot be empty",
            ));
        }

        if self.undecided_placeholder.trim().is_empty() {
            return Err(Error::configuration(
                "Undecided placeholder cannot be empty",
            ));
        }

        if self.move_types.len() != 2 {
            return Err(Error::configuration(format!(
                "Exactly two move type options are required, found {}",
                self.move_types.len()
            )));
        }

        let mut seen_codes = HashSet::new();
        for option in &self.move_types {
            if option.code.chars().count() != 1 {
                return Err(Error::configuration(format!(
                    "Move type code '{}' must be a single character",
                    option.code
                )));
            }
            if option.label.trim().is_empty() {
                return Err(Error::configuration(format!(
                    "Move type code '{}' has an empty label",
                    option.code
                )));
            }
            if !seen_codes.insert(option.code.to_lowercase()) {
                return Err(Error::configuration(format!(
                    "Duplicate move type code '{}'",
                    option.code
                )));
            }
        }

        if self.default_move_type.trim().is_empty() {
            return Err(Error::configuration("Default move type cannot be empty"));
        }

        if self.method_options.is_empty() {
            return Err(Error::configuration(
                "At least one loading method option is required",
            ));
        }

        if self.floor_units.is_empty() || self.floor_units.iter().any(|u| u.is_empty()) {
            return Err(Error::configuration(
                "Floor units must be a non-empty list of non-empty markers",
            ));
        }

        Ok(())
    }

    /// Loading method assigned to new quotes
    pub fn default_method(&self) -> &str {
        self.method_options
            .first()
            .map(String::as_str)
            .unwrap_or(constants::DEFAULT_METHOD)
    }
}

/// Document store options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Directory holding one JSON document per storage key
    pub root: PathBuf,

    /// Minimum phone digits accepted when saving a single quote
    pub min_save_digits: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            root: Config::default_store_root(),
            min_save_digits: constants::MIN_SAVE_PHONE_DIGITS,
        }
    }
}

/// Batch import options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    /// Tokenization policy
    pub policy: PolicyKind,

    /// Year assumed for month/day phrases (current year in Korea when unset)
    pub reference_year: Option<i32>,

    /// Concurrent store writes
    pub concurrency: usize,

    /// Parse and report without writing to the store
    pub dry_run: bool,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            policy: PolicyKind::Strict,
            reference_year: None,
            concurrency: constants::default_store_concurrency(),
            dry_run: false,
        }
    }
}

/// Global configuration for the quote importer
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub parser: ParserConfig,
    pub store: StoreConfig,
    pub import: ImportConfig,
}

impl Config {
    /// Load configuration: defaults, then an optional TOML file, then environment
    ///
    /// An explicitly given file must exist; the default file location is optional.
    pub fn load_layered(config_file: Option<&Path>) -> Result<Self> {
        let mut builder = ::config::Config::builder();

        if let Some(path) = config_file {
            if !path.exists() {
                return Err(Error::configuration(format!(
                    "Config file does not exist: {}",
                    path.display()
                )));
            }
            debug!("Adding config file source: {}", path.display());
            builder = builder.add_source(::config::File::from(path).required(true));
        }

        let config: Config = builder
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Default config file location (`<config dir>/quote-importer/config.toml`)
    pub fn default_config_path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
            .ok_or_else(|| Error::configuration("Could not determine user config directory"))
    }

    /// Default store directory (`<data dir>/quote-importer/quotes`, or `./quotes`)
    pub fn default_store_root() -> PathBuf {
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR_NAME).join(QUOTES_DIR_NAME))
            .unwrap_or_else(|| PathBuf::from(QUOTES_DIR_NAME))
    }

    /// Validate the whole configuration
    pub fn validate(&self) -> Result<()> {
        self.parser.validate()?;

        if self.import.concurrency == 0 {
            return Err(Error::configuration(
                "Import concurrency must be greater than 0",
            ));
        }

        if self.import.concurrency > MAX_STORE_CONCURRENCY {
            return Err(Error::configuration(format!(
                "Import concurrency cannot exceed {}",
                MAX_STORE_CONCURRENCY
            )));
        }

        if let Some(year) = self.import.reference_year {
            if !(1900..=9999).contains(&year) {
                return Err(Error::configuration(format!(
                    "Reference year {} is out of range",
                    year
                )));
            }
        }

        if self.store.min_save_digits == 0 {
            return Err(Error::configuration(
                "Minimum phone digits for saving must be greater than 0",
            ));
        }

        Ok(())
    }

    /// Use a different store directory
    pub fn with_store_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.store.root = root.into();
        self
    }

    /// Use a different tokenization policy
    pub fn with_policy(mut self, policy: PolicyKind) -> Self {
        self.import.policy = policy;
        self
    }

    /// Pin the reference year
    pub fn with_reference_year(mut self, year: i32) -> Self {
        self.import.reference_year = Some(year);
        self
    }

    /// Set the number of concurrent store writes
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.import.concurrency = concurrency;
        self
    }

    /// Enable dry-run mode
    pub fn with_dry_run(mut self) -> Self {
        self.import.dry_run = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.import.policy, PolicyKind::Strict);
        assert_eq!(config.parser.default_method(), constants::DEFAULT_METHOD);
        assert_eq!(config.parser.move_types.len(), 2);
    }

    #[test]
    fn test_empty_option_lists_fail_fast() {
        let mut config = Config::default();
        config.parser.method_options.clear();
        assert!(matches!(
            config.validate(),
            Err(Error::Configuration { .. })
        ));

        let mut config = Config::default();
        config.parser.floor_units.clear();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.parser.move_types.pop();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_move_type_codes_validated() {
        let mut config = ParserConfig::default();
        config.move_types[1].code = "사무".to_string();
        assert!(config.validate().is_err());

        let mut config = ParserConfig::default();
        config.move_types[1].code = config.move_types[0].code.clone();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_concurrency_bounds() {
        assert!(Config::default().with_concurrency(0).validate().is_err());
        assert!(
            Config::default()
                .with_concurrency(MAX_STORE_CONCURRENCY + 1)
                .validate()
                .is_err()
        );
        assert!(Config::default().with_concurrency(4).validate().is_ok());
    }

    #[test]
    fn test_builder_methods() {
        let config = Config::default()
            .with_store_root("/tmp/quotes")
            .with_policy(PolicyKind::Positional)
            .with_reference_year(2025)
            .with_dry_run();

        assert_eq!(config.store.root, PathBuf::from("/tmp/quotes"));
        assert_eq!(config.import.policy, PolicyKind::Positional);
        assert_eq!(config.import.reference_year, Some(2025));
        assert!(config.import.dry_run);
    }

    #[test]
    fn test_load_layered_from_partial_toml() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        writeln!(
            file,
            r#"
[import]
policy = "positional"
reference_year = 2024

[parser]
default_customer_name = "고객"
"#
        )
        .unwrap();

        let config = Config::load_layered(Some(file.path())).unwrap();
        assert_eq!(config.import.policy, PolicyKind::Positional);
        assert_eq!(config.import.reference_year, Some(2024));
        assert_eq!(config.parser.default_customer_name, "고객");
        // Untouched sections keep their defaults
        assert_eq!(config.parser.move_types.len(), 2);
    }

    #[test]
    fn test_load_layered_missing_explicit_file() {
        let result = Config::load_layered(Some(Path::new("/nonexistent/quote-importer.toml")));
        assert!(matches!(result, Err(Error::Configuration { .. })));
    }
}
