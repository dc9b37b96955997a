//! Well-formedness check command

use std::path::PathBuf;

use clap::Args;
use xmlmod_core::validate;

#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Documents to check
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

pub fn execute(args: ValidateArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut failures = 0usize;
    for path in &args.files {
        match validate(path) {
            Ok(()) => println!("{}: OK", path.display()),
            Err(e) => {
                println!("{}", e);
                failures += 1;
            }
        }
    }
    if failures > 0 {
        return Err(format!("{} file(s) are not well-formed", failures).into());
    }
    Ok(())
}
