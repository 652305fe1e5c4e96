//! Render operations: one diagram on demand, or every diagram of a
//! manifest into a directory.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::Result;
use rayon::prelude::*;

use crate::core::{Flow, Manifest, Module, StateMachine};
use crate::emit::{dependency_graph, flowchart, outline, state_diagram};
use crate::ops::select::{select_flow, select_state_machine, SelectError};
use crate::util::fs::write_string;

/// Which emitter produced a diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagramKind {
    Dependencies,
    Flow,
    States,
    Mindmap,
}

impl DiagramKind {
    /// File extension for the dialect.
    pub fn extension(&self) -> &'static str {
        match self {
            DiagramKind::Mindmap => "md",
            _ => "mmd",
        }
    }
}

/// One emitted diagram and where it goes relative to the output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDiagram {
    pub kind: DiagramKind,
    pub path: PathBuf,
    pub content: String,
}

/// Emit the flowchart for `module_id/flow_id`.
pub fn render_flow(manifest: &Manifest, module_id: &str, flow_id: &str) -> Result<String, SelectError> {
    let (module, flow) = select_flow(manifest, module_id, flow_id)?;
    Ok(flowchart(flow, &module.rules))
}

/// Emit the state diagram for `module_id/machine_id`.
pub fn render_states(
    manifest: &Manifest,
    module_id: &str,
    machine_id: &str,
) -> Result<String, SelectError> {
    let (_, machine) = select_state_machine(manifest, module_id, machine_id)?;
    Ok(state_diagram(machine))
}

enum Job<'a> {
    Dependencies,
    Mindmap,
    Flow(&'a Module, &'a Flow),
    States(&'a Module, &'a StateMachine),
}

impl Job<'_> {
    fn run(&self, manifest: &Manifest) -> RenderedDiagram {
        let (kind, path, content) = match self {
            Job::Dependencies => (
                DiagramKind::Dependencies,
                PathBuf::from("dependencies"),
                dependency_graph(manifest),
            ),
            Job::Mindmap => (DiagramKind::Mindmap, PathBuf::from("mindmap"), outline(manifest)),
            Job::Flow(module, flow) => (
                DiagramKind::Flow,
                Path::new("flows")
                    .join(file_stem(&module.id))
                    .join(file_stem(&flow.id)),
                flowchart(flow, &module.rules),
            ),
            Job::States(module, machine) => (
                DiagramKind::States,
                Path::new("states")
                    .join(file_stem(&module.id))
                    .join(file_stem(&machine.id)),
                state_diagram(machine),
            ),
        };

        RenderedDiagram {
            kind,
            path: path.with_extension(kind.extension()),
            content,
        }
    }
}

/// Emit every diagram of the manifest: the dependency graph, the outline,
/// one flowchart per flow and one state diagram per state machine.
///
/// Emitters run in parallel; the result order is fixed (dependency graph,
/// outline, then flows and state machines in manifest order). Paths that
/// would collide because of repeated or similar ids get a `-2`, `-3`, ...
/// suffix.
pub fn render_all(manifest: &Manifest) -> Vec<RenderedDiagram> {
    let mut jobs = vec![Job::Dependencies, Job::Mindmap];
    for module in &manifest.modules {
        jobs.extend(module.flows.iter().map(|flow| Job::Flow(module, flow)));
        jobs.extend(
            module
                .state_machines
                .iter()
                .map(|machine| Job::States(module, machine)),
        );
    }

    tracing::debug!("rendering {} diagrams", jobs.len());
    let mut diagrams: Vec<RenderedDiagram> = jobs.par_iter().map(|job| job.run(manifest)).collect();

    let mut taken = HashSet::new();
    for diagram in &mut diagrams {
        let mut path = diagram.path.clone();
        let mut n = 2;
        while !taken.insert(path.clone()) {
            let stem = diagram
                .path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            path = diagram
                .path
                .with_file_name(format!("{stem}-{n}"))
                .with_extension(diagram.kind.extension());
            n += 1;
        }
        diagram.path = path;
    }

    diagrams
}

/// Write rendered diagrams below `out_dir`, returning the written paths.
pub fn write_all(out_dir: &Path, diagrams: &[RenderedDiagram]) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(diagrams.len());
    for diagram in diagrams {
        let path = out_dir.join(&diagram.path);
        write_string(&path, &diagram.content)?;
        tracing::debug!("wrote {}", path.display());
        written.push(path);
    }
    Ok(written)
}

/// A file-name-safe form of a manifest id.
fn file_stem(id: &str) -> String {
    let stem: String = id
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '.' => '_',
            c if c.is_control() || c.is_whitespace() => '_',
            c => c,
        })
        .collect();
    if stem.is_empty() {
        "x".to_string()
    } else {
        stem
    }
}
