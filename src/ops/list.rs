//! Listing of selectable fragments and published projects.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::core::{Manifest, ProjectIndex};
use crate::util::fs::find_manifests;

/// Tree of modules with their flows and state machines, as accepted by
/// `logicmap flow` and `logicmap states`.
pub fn format_catalog(manifest: &Manifest) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({} modules)", manifest.project.name, manifest.modules.len());

    for (i, module) in manifest.modules.iter().enumerate() {
        let last_module = i + 1 == manifest.modules.len();
        let (branch, indent) = if last_module {
            ("└── ", "    ")
        } else {
            ("├── ", "│   ")
        };
        let _ = writeln!(out, "{branch}{} ({})", module.id, module.name);

        let children: Vec<String> = module
            .flows
            .iter()
            .map(|f| format!("flow {} ({})", f.id, f.name))
            .chain(
                module
                    .state_machines
                    .iter()
                    .map(|m| format!("states {} ({})", m.id, m.name)),
            )
            .collect();

        for (j, child) in children.iter().enumerate() {
            let branch = if j + 1 == children.len() { "└── " } else { "├── " };
            let _ = writeln!(out, "{indent}{branch}{child}");
        }
    }

    out
}

/// One line per project in a published index.
pub fn format_index(index: &ProjectIndex) -> String {
    let mut out = String::new();
    for project in &index.projects {
        let _ = write!(out, "{}", project.id);
        if project.name.is_some() {
            let _ = write!(out, " ({})", project.display_name());
        }
        if let Some(manifest) = &project.manifest {
            let _ = write!(out, " -> {manifest}");
        }
        out.push('\n');
    }
    out
}

/// A manifest discovered by [`scan`].
#[derive(Debug)]
pub struct ScannedManifest {
    pub path: PathBuf,
    /// Decoded manifest, or the decode error message
    pub manifest: Result<Manifest, String>,
}

/// Find and decode every manifest below `root`.
///
/// Undecodable manifests are kept in the result with their error so one
/// broken file does not hide the others.
pub fn scan(root: &Path) -> Result<Vec<ScannedManifest>> {
    let paths = find_manifests(root)?;
    tracing::debug!("found {} manifests below {}", paths.len(), root.display());

    Ok(paths
        .into_iter()
        .map(|path| {
            let manifest = Manifest::load(&path).map_err(|e| e.to_string());
            ScannedManifest { path, manifest }
        })
        .collect())
}

/// One line per scanned manifest.
pub fn format_scan(root: &Path, scanned: &[ScannedManifest]) -> String {
    let mut out = String::new();
    for entry in scanned {
        let shown = entry.path.strip_prefix(root).unwrap_or(&entry.path);
        match &entry.manifest {
            Ok(manifest) => {
                let _ = writeln!(
                    out,
                    "{}: {} ({} modules)",
                    shown.display(),
                    manifest.project.name,
                    manifest.modules.len()
                );
            }
            Err(e) => {
                let _ = writeln!(out, "{}: invalid ({e})", shown.display());
            }
        }
    }
    out
}
