//! Reference checks over a manifest.
//!
//! The emitters tolerate dangling and duplicate ids by design of the data
//! model; `lint` is where those problems become visible to authors. Node-id
//! collisions introduced by [`make_node_id`] are reported here rather than
//! disambiguated in the emitted diagrams.

use std::collections::{HashMap, HashSet};

use crate::core::{Flow, Manifest, Module, StateMachine};
use crate::emit::dependency_graph::{ModuleGraph, EXTERNAL_PREFIX, MODULE_PREFIX};
use crate::emit::sanitize::make_node_id;
use crate::util::diagnostic::{Diagnostic, Severity};

/// Findings from [`lint`], in manifest order.
#[derive(Debug, Default)]
pub struct LintReport {
    pub diagnostics: Vec<Diagnostic>,
}

impl LintReport {
    fn push(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Number of findings with the given severity.
    pub fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }

    pub fn warnings(&self) -> usize {
        self.count(Severity::Warning)
    }

    /// True when nothing above note level was found.
    pub fn is_clean(&self) -> bool {
        self.diagnostics
            .iter()
            .all(|d| d.severity > Severity::Warning)
    }

    /// One-line summary, e.g. `2 warnings, 1 note`.
    pub fn summary(&self) -> String {
        fn plural(n: usize, word: &str) -> String {
            if n == 1 {
                format!("{n} {word}")
            } else {
                format!("{n} {word}s")
            }
        }
        format!(
            "{}, {}",
            plural(self.warnings(), "warning"),
            plural(self.count(Severity::Note), "note")
        )
    }
}

/// Check a manifest for dangling references, duplicate ids, node-id
/// collisions and dependency cycles.
pub fn lint(manifest: &Manifest) -> LintReport {
    let mut report = LintReport::default();

    check_duplicates(
        &mut report,
        "module",
        "manifest",
        manifest.modules.iter().map(|m| m.id.as_str()),
    );

    let graph = ModuleGraph::build(manifest);
    check_node_id_collisions(
        &mut report,
        "modules",
        MODULE_PREFIX,
        manifest.modules.iter().map(|m| m.id.as_str()),
    );
    check_node_id_collisions(
        &mut report,
        "dependencies",
        EXTERNAL_PREFIX,
        graph.externals().into_iter(),
    );

    for external in graph.externals() {
        let dependants: Vec<&str> = manifest
            .modules
            .iter()
            .filter(|m| m.dependencies.iter().any(|d| d == external))
            .map(|m| m.id.as_str())
            .collect();
        report.push(
            Diagnostic::note(format!("dependency `{external}` is not a module of this manifest"))
                .with_context(format!("required by: {}", dependants.join(", ")))
                .with_context("it is drawn as an external/unknown node"),
        );
    }
    for cycle in graph.cycles() {
        report.push(
            Diagnostic::note(format!("dependency cycle: {}", cycle.join(" -> ")))
                .with_suggestion("Break the cycle by moving shared logic into its own module"),
        );
    }

    for module in &manifest.modules {
        lint_module(&mut report, module);
    }

    report
}

fn check_duplicates<'a>(
    report: &mut LintReport,
    what: &str,
    scope: &str,
    ids: impl Iterator<Item = &'a str>,
) {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    for id in ids {
        if !seen.insert(id) && reported.insert(id) {
            report.push(
                Diagnostic::warning(format!("duplicate {what} id `{id}` in {scope}"))
                    .with_context("only the first one is used when resolving references"),
            );
        }
    }
}

fn check_node_id_collisions<'a>(
    report: &mut LintReport,
    what: &str,
    prefix: &str,
    ids: impl Iterator<Item = &'a str>,
) {
    let mut by_node: HashMap<String, Vec<&str>> = HashMap::new();
    let mut order = Vec::new();
    for id in ids {
        let node = make_node_id(prefix, id);
        let ids = by_node.entry(node.clone()).or_default();
        if ids.is_empty() {
            order.push(node);
        }
        if !ids.contains(&id) {
            ids.push(id);
        }
    }

    for node in order {
        let ids = &by_node[&node];
        if ids.len() > 1 {
            let quoted: Vec<String> = ids.iter().map(|id| format!("`{id}`")).collect();
            report.push(
                Diagnostic::warning(format!(
                    "{what} {} share diagram node `{node}`",
                    quoted.join(", ")
                ))
                .with_context("the dependency graph will draw them as a single node")
                .with_suggestion("Rename one of the ids so they differ in letters or digits"),
            );
        }
    }
}

fn lint_module(report: &mut LintReport, module: &Module) {
    let scope = format!("module `{}`", module.id);
    check_duplicates(report, "flow", &scope, module.flows.iter().map(|f| f.id.as_str()));
    check_duplicates(report, "rule", &scope, module.rules.iter().map(|r| r.id.as_str()));
    check_duplicates(
        report,
        "state machine",
        &scope,
        module.state_machines.iter().map(|m| m.id.as_str()),
    );

    for flow in &module.flows {
        lint_flow(report, module, flow);
    }
    for machine in &module.state_machines {
        lint_state_machine(report, module, machine);
    }
}

fn lint_flow(report: &mut LintReport, module: &Module, flow: &Flow) {
    let location = format!("in flow `{}/{}`", module.id, flow.id);

    if flow.steps.is_empty() {
        report.push(
            Diagnostic::note(format!("flow `{}` has no steps", flow.id))
                .with_context(location.clone())
                .with_context("the flowchart shows a placeholder node"),
        );
    }

    let mut orders = HashSet::new();
    for step in flow.ordered_steps() {
        if !orders.insert(step.order) {
            report.push(
                Diagnostic::note(format!("several steps share order {}", step.order))
                    .with_context(location.clone())
                    .with_context("they are drawn in array order"),
            );
        }
        for rule_id in &step.rules {
            if module.rule(rule_id).is_none() {
                report.push(
                    Diagnostic::warning(format!("step references unknown rule `{rule_id}`"))
                        .with_context(format!("{location}, step `{}`", step.name))
                        .with_suggestion(format!(
                            "Add rule `{rule_id}` to module `{}` or remove the reference",
                            module.id
                        )),
                );
            }
        }
    }
}

fn lint_state_machine(report: &mut LintReport, module: &Module, machine: &StateMachine) {
    let location = format!("in state machine `{}/{}`", module.id, machine.id);

    if machine.states.is_empty() {
        report.push(
            Diagnostic::warning(format!("state machine `{}` has no states", machine.id))
                .with_context(location.clone()),
        );
    }
    check_duplicates(
        report,
        "state",
        &location["in ".len()..],
        machine.states.iter().map(|s| s.id.as_str()),
    );

    let initial: Vec<&str> = machine
        .states
        .iter()
        .filter(|s| s.initial)
        .map(|s| s.id.as_str())
        .collect();
    if initial.len() > 1 {
        report.push(
            Diagnostic::warning(format!("several initial states: {}", initial.join(", ")))
                .with_context(location.clone())
                .with_context(format!("only `{}` gets the start arrow", initial[0])),
        );
    } else if initial.is_empty() {
        if let Some(first) = machine.states.first() {
            report.push(
                Diagnostic::note("no state is flagged initial")
                    .with_context(location.clone())
                    .with_context(format!("`{}` is used as the initial state", first.id)),
            );
        }
    }

    for transition in &machine.transitions {
        for id in [&transition.from, &transition.to] {
            if machine.state(id).is_none() {
                report.push(
                    Diagnostic::warning(format!("transition references unknown state `{id}`"))
                        .with_context(format!(
                            "{location}, transition `{} -> {}`",
                            transition.from, transition.to
                        ))
                        .with_suggestion(format!("Declare state `{id}` or fix the transition")),
                );
            }
        }
    }
}
