//! Store commands: search, show and save quote documents

use super::shared::{apply_store_override, load_configuration, open_store, setup_logging};
use crate::app::services::document_store::{
    DocumentStore, FilesystemStore, search_quotes, store_quote,
};
use crate::cli::args::{CommonArgs, OutputFormat, SaveArgs, SearchArgs, ShowArgs};
use crate::cli::input::read_quote_record;
use anyhow::Result;
use colored::*;
use std::path::Path;
use tracing::{debug, info};

/// Run the search command
pub async fn run_search(args: SearchArgs) -> Result<()> {
    setup_logging(&args.common);
    debug!("Command line arguments: {:?}", args);

    let store = configured_store(&args.common, args.store.as_deref())?;
    let results = search_quotes(&store, &args.term).await?;
    info!("Search '{}' matched {} documents", args.term, results.len());

    match args.output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&results)?),
        OutputFormat::Human if results.is_empty() => {
            println!("{}", format!("No quotes match '{}'", args.term.trim()).yellow());
        }
        OutputFormat::Human => {
            for document in &results {
                println!("{}", document.name);
            }
        }
    }

    Ok(())
}

/// Run the show command
pub async fn run_show(args: ShowArgs) -> Result<()> {
    setup_logging(&args.common);
    debug!("Command line arguments: {:?}", args);

    let store = configured_store(&args.common, args.store.as_deref())?;
    let record = store.load(&args.document_id()).await?;

    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}

/// Run the save command
pub async fn run_save(args: SaveArgs) -> Result<()> {
    setup_logging(&args.common);
    debug!("Command line arguments: {:?}", args);

    let record = read_quote_record(args.input_file())?;

    let mut config = load_configuration(&args.common)?;
    apply_store_override(&mut config, args.store.as_deref());
    config.validate()?;

    let store = open_store(&config).await?;
    let stored = store_quote(&store, record, config.store.min_save_digits).await?;

    println!("{} {}", "Saved".green().bold(), stored.name);
    Ok(())
}

/// Store for read-only commands; the directory is never created
fn configured_store(common: &CommonArgs, store: Option<&Path>) -> Result<FilesystemStore> {
    let mut config = load_configuration(common)?;
    apply_store_override(&mut config, store);
    config.validate()?;

    Ok(FilesystemStore::new(config.store.root))
}
