//! xmlmod CLI
//!
//! Command-line boundary for the XML value-substitution engine

use clap::{Parser, Subcommand};
use xmlmod_core::logging::{self, Profile};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "xmlmod")]
#[command(about = "Batch find-and-replace for XML element text and attributes", long_about = None)]
struct Cli {
    /// Emit logs as JSON instead of human-readable lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Apply a substitution to one or more documents
    Apply(commands::substitute::SubstituteArgs),
    /// Report would-be changes without writing anything
    Preview(commands::substitute::SubstituteArgs),
    /// Check that documents are well-formed
    Validate(commands::validate::ValidateArgs),
    /// List distinct tag (and optionally attribute) names in a document
    Tags(commands::tags::TagsArgs),
    /// List distinct trimmed text values under a tag
    Values(commands::values::ValuesArgs),
}

fn main() {
    let cli = Cli::parse();

    logging::init(if cli.log_json {
        Profile::Production
    } else {
        Profile::Development
    });

    let result = match cli.command {
        Commands::Apply(args) => commands::substitute::execute(args, false),
        Commands::Preview(args) => commands::substitute::execute(args, true),
        Commands::Validate(args) => commands::validate::execute(args),
        Commands::Tags(args) => commands::tags::execute(args),
        Commands::Values(args) => commands::values::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
