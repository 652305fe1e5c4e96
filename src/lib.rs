//! logicmap - compile business-logic manifests into diagrams
//!
//! This crate turns a decoded business-logic manifest (modules, flows,
//! rules, state machines, pseudocode, data models) into diagram text:
//! Mermaid flowcharts and state diagrams, and a Markdown mind-map outline.
//! The emitters in [`emit`] are pure; [`ops`] adds selection, batch
//! rendering and reference checks on top.

pub mod core;
pub mod emit;
pub mod ops;
pub mod util;

/// Test utilities for logicmap unit tests.
///
/// This module is only available when compiling with `--cfg test`. It
/// provides fragment builders and canned manifests.
#[cfg(test)]
pub mod test_support;

pub use self::core::{Manifest, ManifestError, ProjectIndex};
pub use emit::{dependency_graph, flowchart, outline, state_diagram};
pub use util::context::GlobalContext;
