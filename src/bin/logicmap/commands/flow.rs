//! `logicmap flow` command

use std::path::Path;

use anyhow::Result;

use crate::cli::FlowArgs;
use crate::commands::write_output;
use logicmap::ops::render_flow;
use logicmap::GlobalContext;

pub fn execute(ctx: &GlobalContext, manifest: Option<&Path>, args: FlowArgs) -> Result<()> {
    let (_, manifest) = ctx.load_manifest(manifest)?;
    let text = render_flow(&manifest, &args.module, &args.flow)?;
    write_output(&text, args.out.output.as_deref())
}
