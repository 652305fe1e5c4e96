//! Filesystem utilities.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use walkdir::WalkDir;

use crate::core::{MANIFEST_ALIAS, MANIFEST_NAME};

/// Directories never searched for manifests.
const SKIP_DIRS: &[&str] = &[".git", "node_modules", "target", ".logicmap"];

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("failed to create directory: {}", path.display()))?;
    }
    Ok(())
}

/// Write a string to a file, creating parent directories if needed.
pub fn write_string(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir(parent)?;
    }
    fs::write(path, contents)
        .with_context(|| format!("failed to write file: {}", path.display()))
}

/// Find every manifest file below `root`, sorted by path.
pub fn find_manifests(root: &Path) -> Result<Vec<PathBuf>> {
    let mut results = Vec::new();

    let walker = WalkDir::new(root).follow_links(false).into_iter().filter_entry(|e| {
        !(e.file_type().is_dir()
            && e.depth() > 0
            && e.file_name()
                .to_str()
                .is_some_and(|name| SKIP_DIRS.contains(&name)))
    });

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("walk error: {}", e);
                continue;
            }
        };
        let is_manifest = entry
            .file_name()
            .to_str()
            .is_some_and(|name| name == MANIFEST_NAME || name == MANIFEST_ALIAS);
        if entry.file_type().is_file() && is_manifest {
            results.push(entry.into_path());
        }
    }

    if results.is_empty() && !root.is_dir() {
        anyhow::bail!("not a directory: {}", root.display());
    }

    results.sort();
    Ok(results)
}
