//! High-level operations.
//!
//! This module contains the implementation of logicmap commands on top of
//! the pure emitters.

pub mod lint;
pub mod list;
pub mod render;
pub mod select;

pub use lint::{lint, LintReport};
pub use list::{format_catalog, format_index, format_scan, scan, ScannedManifest};
pub use render::{
    render_all, render_flow, render_states, write_all, DiagramKind, RenderedDiagram,
};
pub use select::{select_flow, select_module, select_state_machine, SelectError};
