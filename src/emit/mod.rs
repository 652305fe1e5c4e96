//! Manifest-to-diagram emitters.
//!
//! Each emitter is a pure function from a manifest fragment to diagram
//! text. None of them mutate their input or fail: missing optional data is
//! skipped, dangling references fall back to raw ids or fresh aliases, and
//! empty collections get placeholder nodes.

pub mod dependency_graph;
pub mod flowchart;
pub mod lines;
pub mod outline;
pub mod sanitize;
pub mod state_diagram;

pub use dependency_graph::{dependency_graph, ModuleGraph};
pub use flowchart::flowchart;
pub use outline::outline;
pub use state_diagram::state_diagram;
