//! `logicmap states` command

use std::path::Path;

use anyhow::Result;

use crate::cli::StatesArgs;
use crate::commands::write_output;
use logicmap::ops::render_states;
use logicmap::GlobalContext;

pub fn execute(ctx: &GlobalContext, manifest: Option<&Path>, args: StatesArgs) -> Result<()> {
    let (_, manifest) = ctx.load_manifest(manifest)?;
    let text = render_states(&manifest, &args.module, &args.machine)?;
    write_output(&text, args.out.output.as_deref())
}
