//! `logicmap render` command
//!
//! Writes the dependency graph, the mind map, and one diagram per flow and
//! state machine below the output directory.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::cli::RenderArgs;
use logicmap::ops::{render_all, write_all};
use logicmap::GlobalContext;

/// Output directory used when neither the flag nor the config sets one.
const DEFAULT_OUT_DIR: &str = "diagrams";

pub fn execute(ctx: &GlobalContext, manifest: Option<&Path>, args: RenderArgs) -> Result<()> {
    let (manifest_path, manifest) = ctx.load_manifest(manifest)?;

    let out_dir = args
        .out_dir
        .or_else(|| ctx.config().render.out_dir.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUT_DIR));
    let out_dir = ctx.cwd().join(out_dir);

    tracing::info!("Rendering {}", manifest_path.display());
    let diagrams = render_all(&manifest);
    let written = write_all(&out_dir, &diagrams)?;

    for path in &written {
        tracing::debug!("  {}", path.display());
    }
    println!(
        "Rendered {} diagrams into {}",
        written.len(),
        out_dir.display()
    );

    Ok(())
}
