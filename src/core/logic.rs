//! Per-module business logic: flows, rules, state machines and pseudocode.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::code_ref::CodeRef;

/// A functional area of the project.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Module {
    /// Module identifier, unique within the manifest by convention
    pub id: String,

    /// Display name
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub tags: Vec<String>,

    /// Ids of modules this one depends on. May name modules that are not
    /// part of the manifest.
    #[serde(default)]
    pub dependencies: Vec<String>,

    #[serde(default)]
    pub code_refs: Vec<CodeRef>,

    #[serde(default)]
    pub flows: Vec<Flow>,

    #[serde(default)]
    pub rules: Vec<Rule>,

    #[serde(default)]
    pub state_machines: Vec<StateMachine>,

    #[serde(default)]
    pub pseudocodes: Vec<Pseudocode>,
}

impl Module {
    /// Find a flow by id. The first match wins when ids repeat.
    pub fn flow(&self, id: &str) -> Option<&Flow> {
        self.flows.iter().find(|f| f.id == id)
    }

    /// Find a rule by id. The first match wins when ids repeat.
    pub fn rule(&self, id: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.id == id)
    }

    /// Find a state machine by id.
    pub fn state_machine(&self, id: &str) -> Option<&StateMachine> {
        self.state_machines.iter().find(|m| m.id == id)
    }
}

/// An ordered business process.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flow {
    pub id: String,
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// What starts the flow (an API call, a schedule, a user action...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trigger: Option<String>,

    /// Steps in arbitrary array order; `Step::order` defines execution order.
    #[serde(default)]
    pub steps: Vec<Step>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_ref: Option<CodeRef>,
}

impl Flow {
    /// Steps sorted by ascending `order`. Ties keep their array order.
    pub fn ordered_steps(&self) -> Vec<&Step> {
        let mut steps: Vec<&Step> = self.steps.iter().collect();
        steps.sort_by_key(|s| s.order);
        steps
    }
}

/// A single step of a flow.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Position in the flow. Not necessarily contiguous.
    pub order: i64,

    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Ids of rules applied at this step
    #[serde(default)]
    pub rules: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_ref: Option<CodeRef>,
}

/// Rule priority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    /// Display label used in diagrams.
    pub fn label(&self) -> &'static str {
        match self {
            Priority::High => "高",
            Priority::Medium => "中",
            Priority::Low => "低",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::High => write!(f, "high"),
            Priority::Medium => write!(f, "medium"),
            Priority::Low => write!(f, "low"),
        }
    }
}

/// A business rule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    pub id: String,
    pub name: String,

    #[serde(default)]
    pub priority: Priority,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub constraints: Vec<String>,

    #[serde(default)]
    pub effects: Vec<String>,

    /// Entity fields touched by the rule, as `entity.field`
    #[serde(default)]
    pub impacted_fields: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_ref: Option<CodeRef>,
}

/// A finite state machine, usually describing an entity's lifecycle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateMachine {
    pub id: String,
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Entity whose status this machine tracks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity: Option<String>,

    #[serde(default)]
    pub states: Vec<State>,

    #[serde(default)]
    pub transitions: Vec<Transition>,
}

impl StateMachine {
    /// Find a state by id.
    pub fn state(&self, id: &str) -> Option<&State> {
        self.states.iter().find(|s| s.id == id)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct State {
    pub id: String,
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub initial: bool,

    #[serde(default, rename = "final")]
    pub is_final: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transition {
    /// Source state id
    pub from: String,

    /// Target state id
    pub to: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trigger: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Language-neutral pseudocode for an operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pseudocode {
    pub id: String,
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,

    #[serde(default)]
    pub params: Vec<Param>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub returns: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_ref: Option<CodeRef>,

    #[serde(default)]
    pub steps: Vec<PseudoStep>,

    /// External calls made by the operation
    #[serde(default)]
    pub calls: Vec<ExternalCall>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Param {
    pub name: String,

    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub ty: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// One pseudocode line.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PseudoStep {
    /// Nesting level, 0 for top level
    #[serde(default)]
    pub indent: usize,

    #[serde(default, rename = "type")]
    pub kind: PseudoStepKind,

    pub text: String,
}

/// Semantic type of a pseudocode line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PseudoStepKind {
    Comment,
    #[default]
    Action,
    Condition,
    Loop,
    Call,
    Return,
    Error,
}

impl PseudoStepKind {
    pub fn label(&self) -> &'static str {
        match self {
            PseudoStepKind::Comment => "注释",
            PseudoStepKind::Action => "动作",
            PseudoStepKind::Condition => "条件",
            PseudoStepKind::Loop => "循环",
            PseudoStepKind::Call => "调用",
            PseudoStepKind::Return => "返回",
            PseudoStepKind::Error => "异常",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalCall {
    #[serde(rename = "type")]
    pub kind: CallKind,

    /// Endpoint, table, function or job name
    pub target: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Kind of external call made from pseudocode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallKind {
    Api,
    Db,
    #[default]
    Internal,
    Schedule,
}

impl CallKind {
    pub fn label(&self) -> &'static str {
        match self {
            CallKind::Api => "API",
            CallKind::Db => "数据库",
            CallKind::Internal => "内部",
            CallKind::Schedule => "定时",
        }
    }
}
