//! Command implementations for the quote importer CLI
//!
//! Each command is implemented in its own module:
//! - [`import`] - Batch import with per-line report
//! - [`parse`] - Single-line parsing to JSON
//! - [`store`] - Search, show and save against the document store
//! - [`shared`] - Logging, configuration and store setup used by all commands

pub mod import;
pub mod parse;
pub mod shared;
pub mod store;

use crate::cli::args::{Args, Commands};
use anyhow::Result;

/// Dispatch to the handler of the given subcommand
///
/// Returns `Ok(())` without doing anything when no subcommand was given.
pub async fn run(args: Args) -> Result<()> {
    let Some(command) = args.command else {
        return Ok(());
    };

    match command {
        Commands::Import(import_args) => import::run_import(import_args).await,
        Commands::Parse(parse_args) => parse::run_parse(parse_args),
        Commands::Search(search_args) => store::run_search(search_args).await,
        Commands::Show(show_args) => store::run_show(show_args).await,
        Commands::Save(save_args) => store::run_save(save_args).await,
    }
}
