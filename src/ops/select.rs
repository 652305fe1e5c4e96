//! Selection of manifest fragments by id.
//!
//! This is the step a viewer performs when the user picks a module, flow
//! or state machine. Unknown ids are reported with close matches.

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

use crate::core::{Flow, Manifest, Module, StateMachine};
use crate::util::diagnostic::{suggestions, Diagnostic};

/// Maximum number of ids offered as suggestions.
const MAX_SUGGESTIONS: usize = 5;

/// Failure to select a manifest fragment.
#[derive(Debug, Error, MietteDiagnostic)]
pub enum SelectError {
    #[error("module `{id}` not found")]
    #[diagnostic(code(logicmap::select::module))]
    UnknownModule {
        id: String,
        suggestions: Vec<String>,
    },

    #[error("flow `{flow}` not found in module `{module}`")]
    #[diagnostic(code(logicmap::select::flow))]
    UnknownFlow {
        module: String,
        flow: String,
        suggestions: Vec<String>,
    },

    #[error("state machine `{machine}` not found in module `{module}`")]
    #[diagnostic(code(logicmap::select::state_machine))]
    UnknownStateMachine {
        module: String,
        machine: String,
        suggestions: Vec<String>,
    },
}

impl SelectError {
    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let candidates = match self {
            SelectError::UnknownModule { suggestions, .. }
            | SelectError::UnknownFlow { suggestions, .. }
            | SelectError::UnknownStateMachine { suggestions, .. } => suggestions,
        };

        let mut diag = Diagnostic::error(self.to_string());
        if !candidates.is_empty() {
            diag = diag.with_context(format!("did you mean: {}?", candidates.join(", ")));
        }
        diag.with_suggestion(suggestions::LIST_FRAGMENTS)
    }
}

/// Ids similar to `wanted`: case-insensitive substring matches either way.
/// Falls back to every id when the collection is small.
fn similar_ids<'a>(ids: impl Iterator<Item = &'a str> + Clone, wanted: &str) -> Vec<String> {
    let wanted = wanted.to_lowercase();
    let mut matches: Vec<String> = ids
        .clone()
        .filter(|id| {
            let id = id.to_lowercase();
            !wanted.is_empty() && (id.contains(&wanted) || wanted.contains(&id))
        })
        .map(str::to_string)
        .collect();

    if matches.is_empty() {
        let all: Vec<&str> = ids.collect();
        if all.len() <= MAX_SUGGESTIONS {
            matches = all.into_iter().map(str::to_string).collect();
        }
    }

    matches.dedup();
    matches.truncate(MAX_SUGGESTIONS);
    matches
}

/// Select a module by id.
pub fn select_module<'a>(manifest: &'a Manifest, id: &str) -> Result<&'a Module, SelectError> {
    manifest.module(id).ok_or_else(|| SelectError::UnknownModule {
        id: id.to_string(),
        suggestions: similar_ids(manifest.modules.iter().map(|m| m.id.as_str()), id),
    })
}

/// Select a flow within a module.
pub fn select_flow<'a>(
    manifest: &'a Manifest,
    module_id: &str,
    flow_id: &str,
) -> Result<(&'a Module, &'a Flow), SelectError> {
    let module = select_module(manifest, module_id)?;
    let flow = module.flow(flow_id).ok_or_else(|| SelectError::UnknownFlow {
        module: module_id.to_string(),
        flow: flow_id.to_string(),
        suggestions: similar_ids(module.flows.iter().map(|f| f.id.as_str()), flow_id),
    })?;
    Ok((module, flow))
}

/// Select a state machine within a module.
pub fn select_state_machine<'a>(
    manifest: &'a Manifest,
    module_id: &str,
    machine_id: &str,
) -> Result<(&'a Module, &'a StateMachine), SelectError> {
    let module = select_module(manifest, module_id)?;
    let machine = module
        .state_machine(machine_id)
        .ok_or_else(|| SelectError::UnknownStateMachine {
            module: module_id.to_string(),
            machine: machine_id.to_string(),
            suggestions: similar_ids(
                module.state_machines.iter().map(|m| m.id.as_str()),
                machine_id,
            ),
        })?;
    Ok((module, machine))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_manifest;

    #[test]
    fn test_select_flow() {
        let manifest = sample_manifest();
        let (module, flow) = select_flow(&manifest, "order", "create-order").unwrap();
        assert_eq!(module.id, "order");
        assert_eq!(flow.name, "创建订单");
    }

    #[test]
    fn test_unknown_module_suggests() {
        let manifest = sample_manifest();
        let err = select_module(&manifest, "ORDERS").unwrap_err();
        match &err {
            SelectError::UnknownModule { suggestions, .. } => {
                assert_eq!(suggestions, &["order".to_string()]);
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let output = err.to_diagnostic().format(false);
        assert!(output.contains("error: module `ORDERS` not found"));
        assert!(output.contains("did you mean: order?"));
        assert!(output.contains("logicmap list"));
    }

    #[test]
    fn test_unknown_flow_lists_small_collections() {
        let manifest = sample_manifest();
        let err = select_flow(&manifest, "order", "refund").unwrap_err();
        assert!(matches!(
            err,
            SelectError::UnknownFlow { ref suggestions, .. } if suggestions == &["create-order".to_string()]
        ));
    }

    #[test]
    fn test_select_state_machine() {
        let manifest = sample_manifest();
        let (_, machine) = select_state_machine(&manifest, "order", "order-status").unwrap();
        assert_eq!(machine.states.len(), 3);

        assert!(matches!(
            select_state_machine(&manifest, "payment", "x"),
            Err(SelectError::UnknownStateMachine { .. })
        ));
    }
}
