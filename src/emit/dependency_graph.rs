//! Module dependency graph.
//!
//! Modules become nodes; every dependency becomes an edge from the
//! dependant to the dependency. Dependencies naming a module that is not
//! in the manifest get their own "external/unknown" node.

use std::collections::HashMap;

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};

use crate::core::{Manifest, Module};
use crate::emit::lines::Lines;
use crate::emit::sanitize::{dedupe, escape_label, make_node_id};

/// Node id prefix for manifest modules.
pub const MODULE_PREFIX: &str = "mod_";

/// Node id prefix for dependencies not found in the manifest.
pub const EXTERNAL_PREFIX: &str = "ext_";

/// A node of the dependency graph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DepNode<'a> {
    Module(&'a Module),
    External(&'a str),
}

impl DepNode<'_> {
    /// Node id in the emitted diagram.
    pub fn node_id(&self) -> String {
        match self {
            DepNode::Module(module) => make_node_id(MODULE_PREFIX, &module.id),
            DepNode::External(dep) => make_node_id(EXTERNAL_PREFIX, dep),
        }
    }

    /// The raw manifest id behind the node.
    pub fn raw_id(&self) -> &str {
        match self {
            DepNode::Module(module) => &module.id,
            DepNode::External(dep) => dep,
        }
    }

    fn label(&self) -> String {
        match self {
            DepNode::Module(module) => format!("{}\n{}", module.name, module.id),
            DepNode::External(dep) => format!("{dep}\n外部/未知"),
        }
    }
}

/// Dependency graph over the modules of one manifest.
#[derive(Debug)]
pub struct ModuleGraph<'a> {
    graph: DiGraph<DepNode<'a>, ()>,
}

impl<'a> ModuleGraph<'a> {
    /// Build the graph. Module nodes come first in manifest order, then
    /// external nodes in the order they are first referenced.
    pub fn build(manifest: &'a Manifest) -> Self {
        let mut graph = DiGraph::new();
        let mut modules: Vec<NodeIndex> = Vec::with_capacity(manifest.modules.len());
        let mut by_id: HashMap<&'a str, NodeIndex> = HashMap::new();

        for module in &manifest.modules {
            let node = graph.add_node(DepNode::Module(module));
            modules.push(node);
            by_id.entry(module.id.as_str()).or_insert(node);
        }

        let mut externals: HashMap<&'a str, NodeIndex> = HashMap::new();
        for (module, &from) in manifest.modules.iter().zip(&modules) {
            for dep in dedupe(&module.dependencies) {
                let to = match by_id.get(dep) {
                    Some(&node) => node,
                    None => *externals.entry(dep).or_insert_with(|| {
                        tracing::debug!("module `{}` depends on unknown `{}`", module.id, dep);
                        graph.add_node(DepNode::External(dep))
                    }),
                };
                if !graph.contains_edge(from, to) {
                    graph.add_edge(from, to, ());
                }
            }
        }

        ModuleGraph { graph }
    }

    /// All nodes in emission order.
    pub fn nodes(&self) -> impl Iterator<Item = &DepNode<'a>> {
        self.graph.node_weights()
    }

    /// All edges as (dependant, dependency) pairs in emission order.
    pub fn edges(&self) -> impl Iterator<Item = (&DepNode<'a>, &DepNode<'a>)> {
        self.graph.edge_indices().filter_map(move |edge| {
            let (from, to) = self.graph.edge_endpoints(edge)?;
            Some((&self.graph[from], &self.graph[to]))
        })
    }

    /// Raw ids of dependencies that did not resolve to a module.
    pub fn externals(&self) -> Vec<&'a str> {
        self.graph
            .node_weights()
            .filter_map(|node| match node {
                DepNode::External(dep) => Some(*dep),
                DepNode::Module(_) => None,
            })
            .collect()
    }

    /// Module ids taking part in dependency cycles, one sorted list per
    /// strongly connected component. Self-dependencies count as cycles.
    ///
    /// The emitter never calls this; cycles are drawn as they are.
    pub fn cycles(&self) -> Vec<Vec<&'a str>> {
        let mut cycles: Vec<Vec<&'a str>> = tarjan_scc(&self.graph)
            .into_iter()
            .filter(|scc| {
                scc.len() > 1 || scc.iter().any(|&n| self.graph.contains_edge(n, n))
            })
            .map(|scc| {
                let mut ids: Vec<&'a str> = scc
                    .into_iter()
                    .map(|n| match self.graph[n] {
                        DepNode::Module(module) => module.id.as_str(),
                        DepNode::External(dep) => dep,
                    })
                    .collect();
                ids.sort_unstable();
                ids
            })
            .collect();
        cycles.sort();
        cycles
    }

    /// Render as a left-to-right flow diagram.
    pub fn to_mermaid(&self) -> String {
        let mut out = Lines::with_header("flowchart LR");

        let mut external_ids = Vec::new();
        for node in self.nodes() {
            let id = node.node_id();
            out.stmt(format!("{id}[\"{}\"]", escape_label(&node.label())));
            if matches!(node, DepNode::External(_)) {
                external_ids.push(id);
            }
        }

        for (from, to) in self.edges() {
            out.stmt(format!("{} --> {}", from.node_id(), to.node_id()));
        }

        if !external_ids.is_empty() {
            out.stmt("classDef external fill:#f6f6f6,stroke:#999,stroke-dasharray:4 2");
            out.stmt(format!("class {} external", external_ids.join(",")));
        }

        out.finish()
    }
}

/// Emit the module dependency graph of a manifest.
pub fn dependency_graph(manifest: &Manifest) -> String {
    ModuleGraph::build(manifest).to_mermaid()
}
