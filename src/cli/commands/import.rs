//! Import command: parse a batch and write the accepted quotes

use super::shared::{
    apply_parsing_overrides, apply_store_override, build_parser, load_configuration, open_store,
    parse_context, setup_logging,
};
use crate::app::services::batch_importer::{BatchImporter, BatchReport, PersistStats, import_batch};
use crate::cli::args::{ImportArgs, OutputFormat};
use crate::cli::input::read_batch_text;
use crate::config::Config;
use anyhow::Result;
use colored::*;
use indicatif::HumanDuration;
use serde::Serialize;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Everything the import command reports
#[derive(Debug, Serialize)]
pub struct ImportSummary<'a> {
    pub dry_run: bool,
    pub report: &'a BatchReport,
    /// Absent on a dry run
    pub persisted: Option<&'a PersistStats>,
}

/// Run the import command
pub async fn run_import(args: ImportArgs) -> Result<()> {
    let start_time = Instant::now();

    setup_logging(&args.common);
    info!("Starting quote import");
    debug!("Command line arguments: {:?}", args);

    args.validate()?;

    let mut config = load_configuration(&args.common)?;
    apply_import_overrides(&mut config, &args);
    config.validate()?;

    let text = read_batch_text(args.input_file())?;
    let parser = build_parser(&config)?;
    let ctx = parse_context(&config);
    info!(
        "Parsing batch with {} policy, reference year {}",
        config.import.policy, ctx.reference_year
    );

    let report = import_batch(&text, &ctx, &parser);

    let persisted = if config.import.dry_run {
        info!("Dry run: nothing will be written");
        None
    } else {
        let store = open_store(&config).await?;
        let show_progress =
            args.common.show_progress() && args.output_format == OutputFormat::Human;
        let importer =
            BatchImporter::new(store, config.import.concurrency)?.with_progress(show_progress);
        Some(importer.persist(&report).await)
    };

    let summary = ImportSummary {
        dry_run: config.import.dry_run,
        report: &report,
        persisted: persisted.as_ref(),
    };

    match args.output_format {
        OutputFormat::Human => print_human_report(&summary, &config, start_time.elapsed()),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
    }

    Ok(())
}

/// Apply import flags on top of the loaded configuration
pub fn apply_import_overrides(config: &mut Config, args: &ImportArgs) {
    apply_parsing_overrides(config, &args.parsing);
    apply_store_override(config, args.store.as_deref());

    if let Some(concurrency) = args.concurrency {
        config.import.concurrency = concurrency;
    }
    if args.dry_run {
        config.import.dry_run = true;
    }
}

fn print_human_report(summary: &ImportSummary<'_>, config: &Config, elapsed: Duration) {
    let report = summary.report;

    println!();
    if report.is_clean() {
        println!("{}", "Import complete".green().bold());
    } else {
        println!("{}", "Import complete with rejected lines".yellow().bold());
    }
    println!("   • Lines processed: {}", report.lines_processed);
    println!("   • Parsed: {}", report.successes.len().to_string().green());
    println!("   • Rejected: {}", colored_count(report.failures.len(), Color::Red));
    println!("   • Warnings: {}", colored_count(report.warnings.len(), Color::Yellow));

    match summary.persisted {
        Some(stats) => {
            println!(
                "   • Saved: {} to {}",
                stats.saved.to_string().green(),
                config.store.root.display()
            );
            if stats.failed > 0 {
                println!("   • Save failures: {}", stats.failed.to_string().red());
            }
        }
        None => println!("   • {}", "Dry run, nothing written".dimmed()),
    }
    println!("   • Time: {}", HumanDuration(elapsed));

    if !report.failures.is_empty() {
        println!("\n{}", "Rejected lines:".red().bold());
        for failure in &report.failures {
            println!(
                "   line {}: {} {}",
                failure.line_number,
                failure.error,
                format!("[{}]", failure.fragment.replace('\t', " ")).dimmed()
            );
        }
    }

    if !report.warnings.is_empty() {
        println!("\n{}", "Warnings:".yellow().bold());
        for warning in &report.warnings {
            println!("   line {}: {}", warning.line_number, warning.warning);
        }
    }

    if let Some(stats) = summary.persisted {
        if !stats.errors.is_empty() {
            println!("\n{}", "Save failures:".red().bold());
            for error in &stats.errors {
                println!("   {}", error);
            }
        }
    }

    println!();
}

fn colored_count(count: usize, color: Color) -> ColoredString {
    if count == 0 {
        count.to_string().normal()
    } else {
        count.to_string().color(color)
    }
}
