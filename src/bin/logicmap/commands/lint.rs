//! `logicmap lint` command

use std::path::Path;

use anyhow::{bail, Result};

use crate::cli::LintArgs;
use logicmap::ops::lint;
use logicmap::util::diagnostic::{emit, suggestions};
use logicmap::GlobalContext;

pub fn execute(ctx: &GlobalContext, manifest: Option<&Path>, args: LintArgs) -> Result<()> {
    let (manifest_path, manifest) = ctx.load_manifest(manifest)?;

    let report = lint(&manifest);
    for diagnostic in &report.diagnostics {
        emit(&diagnostic.clone().with_location(&manifest_path), ctx.color());
    }

    println!("{}: {}", manifest_path.display(), report.summary());

    let deny = args.deny_warnings || ctx.config().lint.deny_warnings;
    if deny && !report.is_clean() {
        bail!("lint failed: {}\n{}", report.summary(), suggestions::LINT_FAILED);
    }

    Ok(())
}
