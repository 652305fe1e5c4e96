//! `logicmap completions` command

use std::io;

use anyhow::{Context, Result};
use clap::CommandFactory;
use clap_complete::{generate, generate_to};

use crate::cli::{Cli, CompletionsArgs};
use logicmap::util::fs::ensure_dir;

pub fn execute(args: CompletionsArgs) -> Result<()> {
    let mut cmd = Cli::command();
    let bin = cmd.get_name().to_string();

    match args.dir {
        Some(dir) => {
            ensure_dir(&dir)?;
            let path = generate_to(args.shell, &mut cmd, bin, &dir)
                .with_context(|| format!("failed to write completions to {}", dir.display()))?;
            println!("Wrote {}", path.display());
        }
        None => generate(args.shell, &mut cmd, bin, &mut io::stdout()),
    }

    Ok(())
}
