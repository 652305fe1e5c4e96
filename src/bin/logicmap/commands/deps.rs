//! `logicmap deps` command

use std::path::Path;

use anyhow::Result;

use crate::cli::OutputArgs;
use crate::commands::write_output;
use logicmap::emit::dependency_graph;
use logicmap::GlobalContext;

pub fn execute(ctx: &GlobalContext, manifest: Option<&Path>, args: OutputArgs) -> Result<()> {
    let (_, manifest) = ctx.load_manifest(manifest)?;
    write_output(&dependency_graph(&manifest), args.output.as_deref())
}
