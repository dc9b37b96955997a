//! Tag value listing command

use std::path::PathBuf;

use clap::Args;
use xmlmod_core::unique_values;

#[derive(Debug, Args)]
pub struct ValuesArgs {
    /// Document to inspect
    pub file: PathBuf,

    /// Tag name whose text values to collect
    #[arg(long)]
    pub tag: String,
}

pub fn execute(args: ValuesArgs) -> Result<(), Box<dyn std::error::Error>> {
    for value in unique_values(&args.file, &args.tag)? {
        println!("{}", value);
    }
    Ok(())
}
