//! Apply/preview command
//!
//! Both subcommands share one argument surface; preview routes the same
//! request through the engine's dry-run path.

use std::path::PathBuf;

use clap::Args;
use xmlmod_core::{substitute_all, xml_files_in, BatchReport, Substitution};

#[derive(Debug, Args)]
pub struct SubstituteArgs {
    /// Documents to process
    #[arg(required_unless_present = "dir", conflicts_with = "dir")]
    pub files: Vec<PathBuf>,

    /// Process every .xml file directly inside this directory instead
    #[arg(long)]
    pub dir: Option<PathBuf>,

    /// Tag name to select elements by, anywhere below the root
    #[arg(long)]
    pub tag: String,

    /// Value to find: literal, or a pattern with --regex
    #[arg(long)]
    pub old: String,

    /// Replacement value; with --regex, \1-style backreferences are expanded
    #[arg(long)]
    pub new: String,

    /// Target the named attribute instead of element text
    #[arg(long)]
    pub attribute: Option<String>,

    /// Treat --old as a regular expression
    #[arg(long)]
    pub regex: bool,

    /// Emit the per-file report as JSON on stdout
    #[arg(long)]
    pub json: bool,
}

pub fn execute(args: SubstituteArgs, preview: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut substitution = if args.regex {
        Substitution::pattern(args.tag.as_str(), args.old.as_str(), args.new.as_str())
    } else {
        Substitution::literal(args.tag.as_str(), args.old.as_str(), args.new.as_str())
    };
    if let Some(attribute) = &args.attribute {
        substitution = substitution.on_attribute(attribute.as_str());
    }

    let paths = match &args.dir {
        Some(dir) => xml_files_in(dir)?,
        None => args.files.clone(),
    };

    let report = substitute_all(&paths, &substitution, preview)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report, preview);
    }

    if report.has_failures() {
        return Err(format!("{} file(s) failed", report.failures()).into());
    }
    Ok(())
}

fn print_report(report: &BatchReport, preview: bool) {
    for file in &report.files {
        match &file.error {
            Some(error) => println!("{}: {}", file.path, error),
            None => {
                println!("{}: {} change(s)", file.path, file.changes);
                for change in &file.records {
                    println!("  '{}' -> '{}'", change.previous, change.new);
                }
            }
        }
    }
    println!(
        "{} change(s) across {} file(s)",
        report.total_changes(),
        report.files.len()
    );
    if preview {
        println!("Preview only - nothing was written.");
    }
}
