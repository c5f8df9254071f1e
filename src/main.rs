use clap::Parser;
use quote_importer::cli::{args::Args, commands};
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    // Create async runtime and run the command with signal handling
    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result = runtime.block_on(async {
        tokio::select! {
            result = commands::run(args) => result,
            signal = tokio::signal::ctrl_c() => {
                if let Err(e) = signal {
                    eprintln!("Failed to listen for CTRL+C: {}", e);
                }
                eprintln!("\nReceived CTRL+C, shutting down...");
                Err(anyhow::Error::from(quote_importer::Error::processing_interrupted(
                    "Interrupted by user",
                )))
            }
        }
    });

    match result {
        Ok(()) => process::exit(0),
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Quote Importer - Moving Quote Batch Importer");
    println!("============================================");
    println!();
    println!("Turn tab-separated moving-quote lines into JSON quote documents");
    println!("keyed by the customer's phone number.");
    println!();
    println!("USAGE:");
    println!("    quote-importer <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    import      Import a batch of quote lines (main command)");
    println!("    parse       Parse a single line and print it as JSON");
    println!("    search      Search stored quotes by phone number or last four digits");
    println!("    show        Print a stored quote");
    println!("    save        Save a single JSON quote under its phone number");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("LINE FORMAT (tab separated):");
    println!("    date  name  phone  move-type(가/사)  from-address  to-address  notes");
    println!();
    println!("EXAMPLES:");
    println!("    # Import a batch file:");
    println!("    quote-importer import batch.tsv");
    println!();
    println!("    # Preview a pasted batch without saving, keeping empty columns in place:");
    println!("    pbpaste | quote-importer import --dry-run --policy positional");
    println!();
    println!("    # Find a customer by the last four digits of their phone:");
    println!("    quote-importer search 7232");
    println!();
    println!("For detailed help on any command, use:");
    println!("    quote-importer <COMMAND> --help");
}
