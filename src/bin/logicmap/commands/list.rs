//! `logicmap list` command

use std::path::Path;

use anyhow::Result;

use crate::cli::ListArgs;
use logicmap::core::ProjectIndex;
use logicmap::ops::{format_catalog, format_index, format_scan, scan};
use logicmap::GlobalContext;

pub fn execute(ctx: &GlobalContext, manifest: Option<&Path>, args: ListArgs) -> Result<()> {
    if let Some(index) = args.index {
        let index = ProjectIndex::load(&ctx.cwd().join(index))?;
        print!("{}", format_index(&index));
        return Ok(());
    }

    if let Some(root) = args.scan {
        let root = ctx.cwd().join(root);
        let scanned = scan(&root)?;
        if scanned.is_empty() {
            println!("No manifests found below {}", root.display());
        } else {
            print!("{}", format_scan(&root, &scanned));
        }
        return Ok(());
    }

    let (_, manifest) = ctx.load_manifest(manifest)?;
    print!("{}", format_catalog(&manifest));
    Ok(())
}
