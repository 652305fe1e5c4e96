//! Core data structures for logicmap.
//!
//! This module contains the manifest data model consumed by the emitters:
//! - The manifest itself and its JSON decoding
//! - Per-module logic (flows, rules, state machines, pseudocode)
//! - Project-wide catalogs (entities, data models, glossary, changelog)
//! - The project index published alongside manifests

pub mod catalog;
pub mod code_ref;
pub mod index;
pub mod logic;
pub mod manifest;

pub use catalog::{ChangelogEntry, DataModel, Entity, Field, GlossaryEntry};
pub use code_ref::CodeRef;
pub use index::{IndexError, ProjectIndex, ProjectSummary};
pub use logic::{
    CallKind, ExternalCall, Flow, Module, Param, Priority, PseudoStep, PseudoStepKind, Pseudocode,
    Rule, State, StateMachine, Step, Transition,
};
pub use manifest::{
    find_manifest, Manifest, ManifestError, ProjectMeta, MANIFEST_ALIAS, MANIFEST_NAME,
};
