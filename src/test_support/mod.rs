//! Test utilities for logicmap unit tests.
//!
//! Small builders for manifest fragments plus canned manifests (see
//! [`fixtures`]). Builders fill only what a test usually cares about;
//! adjust the returned value with struct update syntax for the rest.

pub mod fixtures;

use crate::core::{Flow, Manifest, Module, Rule, State, StateMachine, Step, Transition};

// Re-export fixtures for convenience
pub use fixtures::*;

/// A module named after its id with the given dependencies.
pub fn module(id: &str, dependencies: &[&str]) -> Module {
    Module {
        id: id.to_string(),
        name: id.to_string(),
        dependencies: dependencies.iter().map(|d| d.to_string()).collect(),
        ..Default::default()
    }
}

/// A manifest holding only `modules`.
pub fn manifest_with_modules(modules: Vec<Module>) -> Manifest {
    let mut manifest = Manifest::default();
    manifest.project.name = "test".to_string();
    manifest.modules = modules;
    manifest
}

/// A flow named after its id.
pub fn flow(id: &str, steps: Vec<Step>) -> Flow {
    Flow {
        id: id.to_string(),
        name: id.to_string(),
        steps,
        ..Default::default()
    }
}

pub fn step(order: i64, name: &str) -> Step {
    Step {
        order,
        name: name.to_string(),
        ..Default::default()
    }
}

pub fn rule(id: &str, name: &str) -> Rule {
    Rule {
        id: id.to_string(),
        name: name.to_string(),
        ..Default::default()
    }
}

pub fn state(id: &str, name: &str) -> State {
    State {
        id: id.to_string(),
        name: name.to_string(),
        ..Default::default()
    }
}

pub fn transition(from: &str, to: &str, trigger: Option<&str>) -> Transition {
    Transition {
        from: from.to_string(),
        to: to.to_string(),
        trigger: trigger.map(str::to_string),
        description: None,
    }
}

pub fn state_machine(states: Vec<State>, transitions: Vec<Transition>) -> StateMachine {
    StateMachine {
        id: "sm".to_string(),
        name: "sm".to_string(),
        states,
        transitions,
        ..Default::default()
    }
}
