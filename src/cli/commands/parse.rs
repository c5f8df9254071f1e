//! Parse command: one line in, one JSON record out

use super::shared::{apply_parsing_overrides, build_parser, load_configuration, parse_context, setup_logging};
use crate::cli::args::ParseArgs;
use anyhow::{Context, Result};
use tracing::debug;

/// Run the parse command
///
/// Prints the record, its storage key and any warnings as JSON. A rejected
/// line is an error.
pub fn run_parse(args: ParseArgs) -> Result<()> {
    setup_logging(&args.common);
    debug!("Command line arguments: {:?}", args);

    let mut config = load_configuration(&args.common)?;
    apply_parsing_overrides(&mut config, &args.parsing);
    config.validate()?;

    let parser = build_parser(&config)?;
    let ctx = parse_context(&config);

    let parsed = parser
        .parse_line(&args.line, &ctx)
        .context("Line rejected")?;

    println!("{}", serde_json::to_string_pretty(&parsed)?);
    Ok(())
}
