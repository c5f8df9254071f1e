//! Shared components for CLI commands
//!
//! Logging setup, layered configuration loading with CLI overrides, and the
//! construction of parsers and stores from the final configuration.

use crate::app::models::ParseContext;
use crate::app::services::document_store::FilesystemStore;
use crate::app::services::line_parser::{FieldPolicy, LineParser};
use crate::cli::args::{CommonArgs, ParsingArgs};
use crate::config::Config;
use crate::Result;
use std::path::Path;
use tracing::{debug, info};

/// Set up structured logging on stderr
///
/// `RUST_LOG` takes precedence over the verbosity flags.
pub fn setup_logging(args: &CommonArgs) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    // Create filter
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("quote_importer={}", log_level)));

    if args.quiet {
        // Minimal logging for quiet mode
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .init();
    } else {
        // Standard logging with timestamps
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .init();
    }

    debug!("Logging initialized at level: {}", log_level);
}

/// Load configuration using layered approach (defaults -> file -> env)
///
/// The default config file is used only when it exists; an explicit one must.
pub fn load_configuration(args: &CommonArgs) -> Result<Config> {
    args.validate()?;

    let default_config_path = if args.config_file.is_none() {
        Config::default_config_path().ok()
    } else {
        None
    };

    let config_file = match &args.config_file {
        Some(path) => Some(path.as_path()),
        None => default_config_path
            .as_ref()
            .filter(|path| path.exists())
            .map(|path| path.as_path()),
    };

    if let Some(config_path) = config_file {
        info!("Using config file: {}", config_path.display());
    } else {
        info!("No config file found, using defaults and environment variables");
    }

    let config = Config::load_layered(config_file)?;
    debug!("Loaded configuration: {:?}", config);
    Ok(config)
}

/// Apply parsing flags on top of the loaded configuration
pub fn apply_parsing_overrides(config: &mut Config, args: &ParsingArgs) {
    if let Some(policy) = args.policy {
        config.import.policy = policy;
    }
    if let Some(year) = args.year {
        config.import.reference_year = Some(year);
    }
}

/// Apply a `--store` flag on top of the loaded configuration
pub fn apply_store_override(config: &mut Config, store: Option<&Path>) {
    if let Some(root) = store {
        config.store.root = root.to_path_buf();
    }
}

/// Build a line parser from the configured policy and parser options
pub fn build_parser(config: &Config) -> Result<LineParser> {
    LineParser::new(
        FieldPolicy::for_kind(config.import.policy),
        config.parser.clone(),
    )
}

/// Parse context for this run: today in Korea and the configured reference year
pub fn parse_context(config: &Config) -> ParseContext {
    match config.import.reference_year {
        Some(year) => ParseContext::now_with_year(year),
        None => ParseContext::now(),
    }
}

/// Open the configured store, creating its directory if needed
pub async fn open_store(config: &Config) -> Result<FilesystemStore> {
    FilesystemStore::open(&config.store.root).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::services::line_parser::PolicyKind;
    use std::path::PathBuf;

    #[test]
    fn test_apply_parsing_overrides() {
        let mut config = Config::default();
        let args = ParsingArgs {
            year: Some(2026),
            policy: Some(PolicyKind::Positional),
        };

        apply_parsing_overrides(&mut config, &args);

        assert_eq!(config.import.reference_year, Some(2026));
        assert_eq!(config.import.policy, PolicyKind::Positional);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_absent_flags_keep_configuration() {
        let mut config = Config::default().with_reference_year(2024);
        apply_parsing_overrides(&mut config, &ParsingArgs::default());
        apply_store_override(&mut config, None);

        assert_eq!(config.import.reference_year, Some(2024));
        assert_eq!(config.import.policy, PolicyKind::Strict);
        assert_eq!(config.store.root, Config::default_store_root());
    }

    #[test]
    fn test_apply_store_override() {
        let mut config = Config::default();
        apply_store_override(&mut config, Some(Path::new("/tmp/quotes")));
        assert_eq!(config.store.root, PathBuf::from("/tmp/quotes"));
    }

    #[test]
    fn test_build_parser_follows_policy() {
        let config = Config::default().with_policy(PolicyKind::Positional);
        let parser = build_parser(&config).unwrap();
        assert_eq!(parser.policy(), &FieldPolicy::positional());
    }

    #[test]
    fn test_parse_context_uses_reference_year() {
        let config = Config::default().with_reference_year(2030);
        assert_eq!(parse_context(&config).reference_year, 2030);
    }

    #[test]
    fn test_load_configuration_rejects_missing_explicit_file() {
        let args = CommonArgs {
            config_file: Some(PathBuf::from("/definitely/missing.toml")),
            ..Default::default()
        };
        assert!(load_configuration(&args).is_err());
    }
}
