//! Tag name listing command

use std::path::PathBuf;

use clap::Args;
use xmlmod_core::{unique_tags, unique_tags_and_attributes};

#[derive(Debug, Args)]
pub struct TagsArgs {
    /// Document to inspect
    pub file: PathBuf,

    /// Also list attribute names
    #[arg(long)]
    pub attributes: bool,
}

pub fn execute(args: TagsArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut names = if args.attributes {
        unique_tags_and_attributes(&args.file)?
    } else {
        unique_tags(&args.file)?
    };
    // Discovery order is first-occurrence; sort for display
    names.sort();
    for name in names {
        println!("{}", name);
    }
    Ok(())
}
