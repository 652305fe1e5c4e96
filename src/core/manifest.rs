//! The business-logic manifest and its JSON decoding.
//!
//! A manifest is decoded exactly once at the boundary. Everything past
//! [`Manifest::from_json`] works on strong types and never re-inspects the
//! JSON shape.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::catalog::{ChangelogEntry, DataModel, Entity, GlossaryEntry};
use crate::core::logic::Module;

/// Canonical manifest file name.
pub const MANIFEST_NAME: &str = "logic-manifest.json";

/// Accepted alternative manifest file name.
pub const MANIFEST_ALIAS: &str = "manifest.json";

/// Failure to locate or decode a manifest.
#[derive(Debug, Error, Diagnostic)]
pub enum ManifestError {
    #[error("could not find logic-manifest.json in {} or any parent directory", .dir.display())]
    #[diagnostic(
        code(logicmap::manifest::not_found),
        help("Pass the manifest explicitly with `--manifest <path>`")
    )]
    NotFound { dir: PathBuf },

    #[error("both {} and {} exist", .primary.display(), .alias.display())]
    #[diagnostic(
        code(logicmap::manifest::ambiguous),
        help("Remove one of the files or pass `--manifest <path>`")
    )]
    AmbiguousManifest { primary: PathBuf, alias: PathBuf },

    #[error("failed to read manifest: {}", .path.display())]
    #[diagnostic(code(logicmap::manifest::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid manifest at line {line}, column {column}: {message}")]
    #[diagnostic(code(logicmap::manifest::decode))]
    Decode {
        line: usize,
        column: usize,
        message: String,
    },
}

impl From<serde_json::Error> for ManifestError {
    fn from(err: serde_json::Error) -> Self {
        ManifestError::Decode {
            line: err.line(),
            column: err.column(),
            message: err.to_string(),
        }
    }
}

/// Project metadata shown at the top of the outline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectMeta {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// A decoded business-logic manifest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    pub project: ProjectMeta,

    #[serde(default)]
    pub modules: Vec<Module>,

    #[serde(default)]
    pub entities: Vec<Entity>,

    #[serde(default)]
    pub data_models: Vec<DataModel>,

    /// Glossary keyed by term key; iterates in key order
    #[serde(default)]
    pub glossary: BTreeMap<String, GlossaryEntry>,

    #[serde(default)]
    pub changelog: Vec<ChangelogEntry>,
}

impl Manifest {
    /// Decode a manifest from JSON text.
    pub fn from_json(text: &str) -> Result<Self, ManifestError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Read and decode a manifest file.
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let text = std::fs::read_to_string(path).map_err(|source| ManifestError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let manifest = Self::from_json(&text)?;
        tracing::debug!(
            "loaded manifest `{}` with {} modules",
            manifest.project.name,
            manifest.modules.len()
        );
        Ok(manifest)
    }

    /// Find a module by id. The first match wins when ids repeat.
    pub fn module(&self, id: &str) -> Option<&Module> {
        self.modules.iter().find(|m| m.id == id)
    }
}

/// Find the manifest file in exactly `dir` (no upward search).
pub fn find_manifest(dir: &Path) -> Result<PathBuf, ManifestError> {
    let primary = dir.join(MANIFEST_NAME);
    let alias = dir.join(MANIFEST_ALIAS);

    match (primary.is_file(), alias.is_file()) {
        (true, true) => Err(ManifestError::AmbiguousManifest { primary, alias }),
        (true, false) => Ok(primary),
        (false, true) => Ok(alias),
        (false, false) => Err(ManifestError::NotFound {
            dir: dir.to_path_buf(),
        }),
    }
}
