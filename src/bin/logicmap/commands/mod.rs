//! Command implementations

use std::path::Path;

use anyhow::Result;

use logicmap::util::fs::write_string;

pub mod completions;
pub mod deps;
pub mod flow;
pub mod lint;
pub mod list;
pub mod mindmap;
pub mod render;
pub mod states;

/// Write diagram text to `output`, or to stdout when no file is given.
pub fn write_output(text: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            write_string(path, text)?;
            tracing::info!("Wrote {}", path.display());
        }
        None => print!("{text}"),
    }
    Ok(())
}
