//! State diagram of a single state machine.
//!
//! The state-diagram dialect wants bare aliases, so states get short
//! `S1, S2, ...` aliases from an [`AliasTable`] instead of sanitized ids.

use std::collections::HashMap;

use crate::core::StateMachine;
use crate::emit::lines::Lines;
use crate::emit::sanitize::escape_label;

/// Start/end pseudostate.
const PSEUDOSTATE: &str = "[*]";

/// Alias of the placeholder state emitted for machines without states.
const EMPTY_ALIAS: &str = "Empty";

/// Maps state ids to `S<n>` aliases, minting new ones on first sight.
#[derive(Debug, Default)]
pub struct AliasTable {
    aliases: HashMap<String, String>,
}

impl AliasTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Alias for `id`, minted on first use.
    pub fn alias(&mut self, id: &str) -> String {
        let next = self.aliases.len() + 1;
        self.aliases
            .entry(id.to_string())
            .or_insert_with(|| format!("S{next}"))
            .clone()
    }

    /// Whether `id` already has an alias.
    pub fn contains(&self, id: &str) -> bool {
        self.aliases.contains_key(id)
    }
}

/// Emit a state diagram for `machine`.
///
/// Transitions naming unknown states still get an alias, so malformed
/// input yields a visibly wrong but parseable diagram.
pub fn state_diagram(machine: &StateMachine) -> String {
    let mut out = Lines::with_header("stateDiagram-v2");
    let mut aliases = AliasTable::new();

    for state in &machine.states {
        let alias = aliases.alias(&state.id);
        out.stmt(format!("state \"{}\" as {alias}", escape_label(&state.name)));
    }

    let initial = machine
        .states
        .iter()
        .find(|s| s.initial)
        .or_else(|| machine.states.first());
    match initial {
        Some(state) => {
            let alias = aliases.alias(&state.id);
            out.stmt(format!("{PSEUDOSTATE} --> {alias}"));
        }
        None => {
            out.stmt(format!("state \"暂无状态\" as {EMPTY_ALIAS}"));
            out.stmt(format!("{PSEUDOSTATE} --> {EMPTY_ALIAS}"));
        }
    }

    for transition in &machine.transitions {
        for id in [&transition.from, &transition.to] {
            if !aliases.contains(id) {
                tracing::debug!(
                    "state machine `{}` references unknown state `{}`",
                    machine.id,
                    id
                );
            }
        }
        let from = aliases.alias(&transition.from);
        let to = aliases.alias(&transition.to);

        match transition.trigger.as_deref().filter(|t| !t.trim().is_empty()) {
            Some(trigger) => out.stmt(format!("{from} --> {to} : {}", escape_label(trigger))),
            None => out.stmt(format!("{from} --> {to}")),
        }
    }

    for state in machine.states.iter().filter(|s| s.is_final) {
        let alias = aliases.alias(&state.id);
        out.stmt(format!("{alias} --> {PSEUDOSTATE}"));
    }

    out.finish()
}
