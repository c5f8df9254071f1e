//! Command-line argument definitions for the quote importer
//!
//! This module defines the complete CLI interface using the clap derive API.

use crate::app::services::line_parser::PolicyKind;
use crate::constants::{MAX_STORE_CONCURRENCY, STORAGE_KEY_SUFFIX};
use crate::{Error, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

/// Input path meaning "read standard input"
pub const STDIN_MARKER: &str = "-";

/// CLI arguments for the moving-quote importer
///
/// Turns tab-separated quote lines pasted from spreadsheets or chat into
/// JSON quote documents keyed by the customer's phone number.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "quote-importer",
    version,
    about = "Import tab-separated moving-quote lines into JSON quote documents",
    long_about = "Parses loosely structured, tab-separated moving-quote lines (date, customer, \
                  phone, move type, addresses, notes), normalizes Korean date phrases and phone \
                  numbers, and stores one JSON document per customer phone number. Rejected lines \
                  and recoverable anomalies are reported line by line."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands for the quote importer
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Import a batch of quote lines from a file or standard input
    Import(ImportArgs),
    /// Parse a single line and print the resulting record as JSON
    Parse(ParseArgs),
    /// Search stored quotes by phone number or its last four digits
    Search(SearchArgs),
    /// Print a stored quote
    Show(ShowArgs),
    /// Save a single JSON quote under its phone number
    Save(SaveArgs),
}

/// Options shared by every subcommand
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CommonArgs {
    /// Path to configuration file
    ///
    /// TOML configuration file. If not specified, looks for
    /// ~/.config/quote-importer/config.toml and falls back to built-in defaults.
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors. Overrides verbose settings.
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Options for commands that read parsed lines
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ParsingArgs {
    /// Year assumed for month/day dates such as "5월 30일" or "5/30"
    ///
    /// Defaults to the current year in Korea.
    #[arg(
        short = 'y',
        long = "year",
        value_name = "YEAR",
        help = "Year assumed for dates written without one"
    )]
    pub year: Option<i32>,

    /// Field policy for splitting lines
    ///
    /// strict: empty fields are dropped and later fields shift left; at least
    /// three fields and an origin address are required.
    /// positional: empty fields keep their column; only a phone is required.
    #[arg(
        short = 'p',
        long = "policy",
        value_enum,
        value_name = "POLICY",
        help = "Field policy: strict or positional"
    )]
    pub policy: Option<PolicyKind>,
}

/// Arguments for the import command
#[derive(Debug, Clone, Parser)]
pub struct ImportArgs {
    /// Batch file to import, one quote per line
    ///
    /// Reads standard input when omitted or "-".
    #[arg(value_name = "FILE", help = "Batch file to import (stdin when omitted or '-')")]
    pub input: Option<PathBuf>,

    #[command(flatten)]
    pub parsing: ParsingArgs,

    /// Directory holding the quote documents
    #[arg(
        short = 's',
        long = "store",
        value_name = "DIR",
        help = "Directory holding the quote documents"
    )]
    pub store: Option<PathBuf>,

    /// Parse and report without writing anything
    #[arg(
        long = "dry-run",
        help = "Parse and report without writing to the store"
    )]
    pub dry_run: bool,

    /// Number of concurrent store writes
    #[arg(
        short = 'j',
        long = "concurrency",
        value_name = "COUNT",
        help = "Number of concurrent store writes"
    )]
    pub concurrency: Option<usize>,

    #[arg(
        long = "output-format",
        value_enum,
        default_value = "human",
        help = "Output format for the import report"
    )]
    pub output_format: OutputFormat,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Arguments for the parse command
#[derive(Debug, Clone, Parser)]
pub struct ParseArgs {
    /// A single tab-separated quote line
    #[arg(value_name = "LINE", help = "Tab-separated quote line")]
    pub line: String,

    #[command(flatten)]
    pub parsing: ParsingArgs,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Arguments for the search command
#[derive(Debug, Clone, Parser)]
pub struct SearchArgs {
    /// Full phone number or its last four digits
    #[arg(value_name = "TERM", help = "Phone number or last four digits")]
    pub term: String,

    #[arg(
        short = 's',
        long = "store",
        value_name = "DIR",
        help = "Directory holding the quote documents"
    )]
    pub store: Option<PathBuf>,

    #[arg(
        long = "output-format",
        value_enum,
        default_value = "human",
        help = "Output format for search results"
    )]
    pub output_format: OutputFormat,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Arguments for the show command
#[derive(Debug, Clone, Parser)]
pub struct ShowArgs {
    /// Document id, with or without the ".json" extension
    #[arg(value_name = "ID", help = "Document id, e.g. 01012345678 or 01012345678.json")]
    pub id: String,

    #[arg(
        short = 's',
        long = "store",
        value_name = "DIR",
        help = "Directory holding the quote documents"
    )]
    pub store: Option<PathBuf>,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Arguments for the save command
#[derive(Debug, Clone, Parser)]
pub struct SaveArgs {
    /// JSON quote document to save
    ///
    /// Reads standard input when omitted or "-".
    #[arg(value_name = "FILE", help = "JSON quote file (stdin when omitted or '-')")]
    pub input: Option<PathBuf>,

    #[arg(
        short = 's',
        long = "store",
        value_name = "DIR",
        help = "Directory holding the quote documents"
    )]
    pub store: Option<PathBuf>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
}

impl Args {
    /// The common options of whichever subcommand was given
    pub fn common(&self) -> Option<&CommonArgs> {
        self.command.as_ref().map(|command| match command {
            Commands::Import(args) => &args.common,
            Commands::Parse(args) => &args.common,
            Commands::Search(args) => &args.common,
            Commands::Show(args) => &args.common,
            Commands::Save(args) => &args.common,
        })
    }
}

impl CommonArgs {
    pub fn validate(&self) -> Result<()> {
        // Validate config file exists if specified
        if let Some(config_file) = &self.config_file {
            if !config_file.exists() {
                return Err(Error::configuration(format!(
                    "Config file does not exist: {}",
                    config_file.display()
                )));
            }
        }

        Ok(())
    }

    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}

impl ImportArgs {
    pub fn validate(&self) -> Result<()> {
        self.common.validate()?;

        if let Some(input) = self.input_file() {
            if !input.is_file() {
                return Err(Error::configuration(format!(
                    "Input file does not exist: {}",
                    input.display()
                )));
            }
        }

        if let Some(concurrency) = self.concurrency {
            if concurrency == 0 {
                return Err(Error::configuration(
                    "Concurrency must be greater than 0",
                ));
            }

            if concurrency > MAX_STORE_CONCURRENCY {
                return Err(Error::configuration(format!(
                    "Concurrency cannot exceed {}",
                    MAX_STORE_CONCURRENCY
                )));
            }
        }

        Ok(())
    }

    /// The input file, or `None` for standard input
    pub fn input_file(&self) -> Option<&Path> {
        input_file(self.input.as_deref())
    }
}

impl SaveArgs {
    /// The input file, or `None` for standard input
    pub fn input_file(&self) -> Option<&Path> {
        input_file(self.input.as_deref())
    }
}

impl ShowArgs {
    /// The id with the document extension added when missing
    pub fn document_id(&self) -> String {
        let id = self.id.trim();
        if id.ends_with(STORAGE_KEY_SUFFIX) {
            id.to_string()
        } else {
            format!("{}{}", id, STORAGE_KEY_SUFFIX)
        }
    }
}

fn input_file(input: Option<&Path>) -> Option<&Path> {
    input.filter(|path| path.as_os_str() != STDIN_MARKER)
}
