//! Project index published next to the manifests.
//!
//! The index comes in two shapes: a bare array, or an object with a
//! `projects` array. Each entry is either a plain project id or an object
//! with details. Both are decoded here once and normalized to
//! [`ProjectSummary`] values.

use std::path::Path;

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum IndexError {
    #[error("failed to read project index: {}", .path.display())]
    #[diagnostic(code(logicmap::index::io))]
    Io {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unrecognized project index: {0}")]
    #[diagnostic(
        code(logicmap::index::shape),
        help("Expected an array of project ids or objects, optionally wrapped in {{\"projects\": [...]}}")
    )]
    Shape(#[from] serde_json::Error),
}

/// A project listed in the index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSummary {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Manifest location relative to the index
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manifest: Option<String>,
}

impl ProjectSummary {
    /// Name to show, falling back to the id.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ProjectEntry {
    Id(String),
    Detailed(ProjectSummary),
}

impl From<ProjectEntry> for ProjectSummary {
    fn from(entry: ProjectEntry) -> Self {
        match entry {
            ProjectEntry::Id(id) => ProjectSummary {
                id,
                ..Default::default()
            },
            ProjectEntry::Detailed(summary) => summary,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum IndexDocument {
    List(Vec<ProjectEntry>),
    Wrapped { projects: Vec<ProjectEntry> },
}

/// The decoded project index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectIndex {
    pub projects: Vec<ProjectSummary>,
}

impl ProjectIndex {
    /// Decode an index document in either supported shape.
    pub fn from_json(text: &str) -> Result<Self, IndexError> {
        let doc: IndexDocument = serde_json::from_str(text)?;
        let entries = match doc {
            IndexDocument::List(entries) => entries,
            IndexDocument::Wrapped { projects } => projects,
        };

        Ok(ProjectIndex {
            projects: entries.into_iter().map(ProjectSummary::from).collect(),
        })
    }

    pub fn load(path: &Path) -> Result<Self, IndexError> {
        let text = std::fs::read_to_string(path).map_err(|source| IndexError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_string_list() {
        let index = ProjectIndex::from_json(r#"["shop", "crm"]"#).unwrap();
        assert_eq!(index.projects.len(), 2);
        assert_eq!(index.projects[0].id, "shop");
        assert_eq!(index.projects[0].display_name(), "shop");
    }

    #[test]
    fn test_wrapped_objects() {
        let index = ProjectIndex::from_json(
            r#"{"projects": [{"id": "shop", "name": "Shop", "manifest": "shop/logic-manifest.json"}]}"#,
        )
        .unwrap();
        assert_eq!(index.projects[0].display_name(), "Shop");
        assert_eq!(
            index.projects[0].manifest.as_deref(),
            Some("shop/logic-manifest.json")
        );
    }

    #[test]
    fn test_mixed_entries() {
        let index = ProjectIndex::from_json(r#"["shop", {"id": "crm"}]"#).unwrap();
        let ids: Vec<_> = index.projects.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["shop", "crm"]);
    }

    #[test]
    fn test_rejects_other_shapes() {
        assert!(matches!(
            ProjectIndex::from_json(r#"{"items": []}"#),
            Err(IndexError::Shape(_))
        ));
        assert!(ProjectIndex::from_json("42").is_err());
    }
}
