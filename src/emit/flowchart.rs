//! Flowchart of a single flow.
//!
//! Layout, top-down: title → trigger → steps in ascending `order`. A code
//! location hangs off the title on a dotted edge, outside the execution
//! path.

use crate::core::{Flow, Rule, Step};
use crate::emit::lines::Lines;
use crate::emit::sanitize::{dedupe, escape_label, format_code_ref, make_node_id};

const TRIGGER_ID: &str = "trigger";
const EMPTY_ID: &str = "no_steps";
const CODE_ID: &str = "code_ref";

/// Emit a top-down flowchart for `flow`, resolving step rule ids
/// against `rules` (the owning module's rules).
pub fn flowchart(flow: &Flow, rules: &[Rule]) -> String {
    let mut out = Lines::with_header("flowchart TD");

    let title_id = make_node_id("flow_", &flow.id);
    out.stmt(format!("{title_id}[\"{}\"]", escape_label(&flow.name)));

    let trigger = flow
        .trigger
        .as_deref()
        .filter(|t| !t.trim().is_empty())
        .unwrap_or("-");
    out.stmt(format!(
        "{TRIGGER_ID}(\"{}\")",
        escape_label(&format!("触发：{trigger}"))
    ));
    out.stmt(format!("{title_id} --> {TRIGGER_ID}"));

    let steps = flow.ordered_steps();
    if steps.is_empty() {
        out.stmt(format!("{EMPTY_ID}[\"暂无步骤\"]"));
        out.stmt(format!("{TRIGGER_ID} --> {EMPTY_ID}"));
    } else {
        let mut prev = TRIGGER_ID.to_string();
        for (index, step) in steps.iter().enumerate() {
            let id = format!("step_{}", index + 1);
            out.stmt(format!("{id}[\"{}\"]", escape_label(&step_label(step, rules))));
            out.stmt(format!("{prev} --> {id}"));
            prev = id;
        }
    }

    let code = format_code_ref(flow.code_ref.as_ref());
    if !code.is_empty() {
        out.stmt(format!(
            "{CODE_ID}[\"{}\"]",
            escape_label(&format!("代码：{code}"))
        ));
        out.stmt(format!("{title_id} -.-> {CODE_ID}"));
        out.stmt("classDef aux fill:#fafafa,stroke:#bbb,color:#666");
        out.stmt(format!("class {CODE_ID} aux"));
    }

    out.finish()
}

/// Multi-line label: `"<order>. <name>"`, the description, then the
/// rules applied at the step.
fn step_label(step: &Step, rules: &[Rule]) -> String {
    let mut label = format!("{}. {}", step.order, step.name);

    if let Some(description) = step.description.as_deref().filter(|d| !d.is_empty()) {
        label.push('\n');
        label.push_str(description);
    }

    let names = rule_names(&step.rules, rules);
    if !names.is_empty() {
        label.push_str("\n规则：");
        label.push_str(&names.join("、"));
    }

    label
}

/// Resolve rule ids to names, falling back to the raw id.
fn rule_names<'a>(ids: &'a [String], rules: &'a [Rule]) -> Vec<&'a str> {
    let mut names: Vec<&'a str> = Vec::new();
    for id in dedupe(ids) {
        let name = match rules.iter().find(|r| r.id == id) {
            Some(rule) => rule.name.as_str(),
            None => {
                tracing::debug!("step references unknown rule `{}`", id);
                id
            }
        };
        if !names.contains(&name) {
            names.push(name);
        }
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CodeRef;
    use crate::test_support::{flow, rule, step};

    fn node_order(out: &str) -> Vec<&str> {
        out.lines()
            .map(str::trim)
            .filter(|l| l.starts_with("step_") && l.contains("[\""))
            .collect()
    }

    #[test]
    fn test_steps_sorted_by_order() {
        let f = flow("f", vec![step(3, "c"), step(1, "a"), step(2, "b")]);
        let out = flowchart(&f, &[]);

        assert_eq!(
            node_order(&out),
            ["step_1[\"1. a\"]", "step_2[\"2. b\"]", "step_3[\"3. c\"]"]
        );
        assert!(out.contains("trigger --> step_1"));
        assert!(out.contains("step_1 --> step_2"));
        assert!(out.contains("step_2 --> step_3"));
    }

    #[test]
    fn test_order_scenario() {
        let f = flow("f1", vec![step(2, "pay"), step(1, "create")]);
        let out = flowchart(&f, &[]);

        let create = out.find("1. create").unwrap();
        let pay = out.find("2. pay").unwrap();
        assert!(create < pay);
        assert!(out.contains("step_1[\"1. create\"]"));
        assert!(out.contains("trigger --> step_1"));
    }

    #[test]
    fn test_title_and_trigger() {
        let mut f = flow("order-create", vec![step(1, "a")]);
        f.name = "Create order".to_string();
        f.trigger = Some("POST /orders".to_string());

        let out = flowchart(&f, &[]);
        assert!(out.starts_with("flowchart TD\n"));
        assert!(out.contains("flow_order_create[\"Create order\"]"));
        assert!(out.contains("trigger(\"触发：POST /orders\")"));
        assert!(out.contains("flow_order_create --> trigger"));
    }

    #[test]
    fn test_missing_trigger_placeholder() {
        let out = flowchart(&flow("f", vec![]), &[]);
        assert!(out.contains("trigger(\"触发：-\")"));
    }

    #[test]
    fn test_empty_steps_placeholder() {
        let out = flowchart(&flow("f", vec![]), &[]);
        assert!(out.contains("no_steps[\"暂无步骤\"]"));
        assert!(out.contains("trigger --> no_steps"));
        assert!(!out.contains("step_"));
    }

    #[test]
    fn test_step_label_with_rules() {
        let mut s = step(1, "validate");
        s.description = Some("check stock".to_string());
        s.rules = vec!["r1".into(), "missing".into(), "r1".into(), "r1-alias".into()];
        let rules = vec![rule("r1", "Stock check"), rule("r1-alias", "Stock check")];

        let out = flowchart(&flow("f", vec![s]), &rules);
        assert!(out.contains(
            "step_1[\"1. validate<br/>check stock<br/>规则：Stock check、missing\"]"
        ));
    }

    #[test]
    fn test_code_ref_is_dotted() {
        let mut f = flow("f", vec![step(1, "a")]);
        f.code_ref = Some(CodeRef::new("src/order.ts").with_function("create"));

        let out = flowchart(&f, &[]);
        assert!(out.contains("code_ref[\"代码：src/order.ts:create\"]"));
        assert!(out.contains("flow_f -.-> code_ref"));
        assert!(!out.contains("step_1 --> code_ref"));
    }

    #[test]
    fn test_no_code_ref_line_when_absent() {
        let out = flowchart(&flow("f", vec![step(1, "a")]), &[]);
        assert!(!out.contains("code_ref"));
    }

    #[test]
    fn test_labels_are_escaped() {
        let f = flow("f", vec![step(1, "say \"hi\"\nthen go")]);
        let out = flowchart(&f, &[]);
        assert!(out.contains("step_1[\"1. say 'hi'<br/>then go\"]"));
    }

    #[test]
    fn test_deterministic() {
        let f = flow("f", vec![step(2, "b"), step(1, "a")]);
        assert_eq!(flowchart(&f, &[]), flowchart(&f, &[]));
    }
}
