//! Mind-map outline of a whole manifest.
//!
//! The outline is Markdown-style: `#` headings (at most six levels) for
//! structure and indented `- ` bullets for details. Every collection is
//! announced with its count, even when empty, so the outline keeps the
//! same shape across manifests.

use crate::core::{
    CodeRef, DataModel, Entity, Flow, Manifest, Module, Pseudocode, Rule, StateMachine,
};
use crate::emit::lines::Lines;
use crate::emit::sanitize::{dedupe, escape_outline_text, format_code_ref, inline_code};

/// Deepest heading level the outline dialect supports.
pub const MAX_HEADING_LEVEL: usize = 6;

struct Outline {
    lines: Lines,
}

impl Outline {
    fn new() -> Self {
        Outline {
            lines: Lines::default(),
        }
    }

    fn heading(&mut self, level: usize, text: impl AsRef<str>) {
        let level = level.clamp(1, MAX_HEADING_LEVEL);
        self.lines
            .push(format!("{} {}", "#".repeat(level), text.as_ref()));
    }

    fn bullet(&mut self, depth: usize, text: impl AsRef<str>) {
        self.lines.nested(depth, format!("- {}", text.as_ref()));
    }

    /// `- <label>：<text>` when `text` is present and non-empty.
    fn field(&mut self, depth: usize, label: &str, text: Option<&str>) {
        if let Some(text) = text.filter(|t| !t.trim().is_empty()) {
            self.bullet(depth, format!("{label}：{}", esc(text)));
        }
    }

    /// `- 代码位置：`...`` when a code reference is present.
    fn code_location(&mut self, depth: usize, code_ref: Option<&CodeRef>) {
        let code = format_code_ref(code_ref);
        if !code.is_empty() {
            self.bullet(depth, format!("代码位置：{}", inline_code(&code)));
        }
    }

    /// `- <label>（n）：a、b` for a short inline list.
    fn inline_list<S: AsRef<str>>(&mut self, depth: usize, label: &str, items: &[S], sep: &str) {
        let items = dedupe(items);
        if items.is_empty() {
            self.bullet(depth, format!("{label}（0）"));
        } else {
            let joined: Vec<String> = items.iter().map(|s| esc(s)).collect();
            self.bullet(
                depth,
                format!("{label}（{}）：{}", items.len(), joined.join(sep)),
            );
        }
    }

    fn finish(self) -> String {
        self.lines.finish()
    }
}

fn esc(text: &str) -> String {
    escape_outline_text(text)
}

fn titled(name: &str, id: &str) -> String {
    format!("{}（{}）", esc(name), esc(id))
}

/// Emit the outline for a whole manifest.
pub fn outline(manifest: &Manifest) -> String {
    let mut out = Outline::new();

    let project = &manifest.project;
    out.heading(1, esc(&project.name));
    out.field(0, "版本", project.version.as_deref());
    out.field(0, "描述", project.description.as_deref());
    if let Some(repo) = project.repository.as_deref().filter(|r| !r.is_empty()) {
        out.bullet(0, format!("仓库：{}", inline_code(repo)));
    }
    out.field(0, "更新时间", project.updated_at.as_deref());

    out.heading(2, format!("模块（{}）", manifest.modules.len()));
    for module in &manifest.modules {
        emit_module(&mut out, module);
    }

    out.heading(2, format!("实体（{}）", manifest.entities.len()));
    for entity in &manifest.entities {
        emit_entity(&mut out, entity);
    }

    out.heading(2, format!("数据模型（{}）", manifest.data_models.len()));
    for model in &manifest.data_models {
        emit_data_model(&mut out, model);
    }

    out.heading(2, format!("术语表（{}）", manifest.glossary.len()));
    for (key, entry) in &manifest.glossary {
        let mut line = format!("{}（{}）", esc(&entry.term), esc(key));
        if !entry.description.trim().is_empty() {
            line.push('：');
            line.push_str(&esc(&entry.description));
        }
        out.bullet(0, line);
    }

    out.heading(2, format!("变更记录（{}）", manifest.changelog.len()));
    for change in &manifest.changelog {
        out.bullet(
            0,
            format!(
                "{} · {} · {}",
                esc(&change.date),
                esc(&change.kind),
                esc(&change.summary)
            ),
        );
    }

    out.finish()
}

fn emit_module(out: &mut Outline, module: &Module) {
    out.heading(3, titled(&module.name, &module.id));
    out.field(0, "描述", Some(module.description.as_str()));
    out.inline_list(0, "标签", &module.tags, "、");
    out.inline_list(0, "依赖", &module.dependencies, "、");

    let code: Vec<String> = module
        .code_refs
        .iter()
        .map(|r| format_code_ref(Some(r)))
        .collect();
    let code = dedupe(&code);
    out.bullet(0, format!("代码（{}）", code.len()));
    for entry in code {
        out.bullet(1, inline_code(entry));
    }

    out.heading(4, format!("流程（{}）", module.flows.len()));
    for flow in &module.flows {
        emit_flow(out, flow, &module.rules);
    }

    out.heading(4, format!("规则（{}）", module.rules.len()));
    for rule in &module.rules {
        emit_rule(out, rule);
    }

    out.heading(4, format!("状态机（{}）", module.state_machines.len()));
    for machine in &module.state_machines {
        emit_state_machine(out, machine);
    }

    out.heading(4, format!("伪代码（{}）", module.pseudocodes.len()));
    for pseudo in &module.pseudocodes {
        emit_pseudocode(out, pseudo);
    }
}

fn emit_flow(out: &mut Outline, flow: &Flow, rules: &[Rule]) {
    out.heading(5, titled(&flow.name, &flow.id));
    out.field(0, "触发", flow.trigger.as_deref());
    out.field(0, "描述", flow.description.as_deref());
    out.code_location(0, flow.code_ref.as_ref());

    let steps = flow.ordered_steps();
    out.bullet(0, format!("步骤（{}）", steps.len()));
    for step in steps {
        out.bullet(1, format!("第{}步：{}", step.order, esc(&step.name)));
        out.field(2, "说明", step.description.as_deref());

        let names: Vec<&str> = dedupe(&step.rules)
            .into_iter()
            .map(|id| {
                rules
                    .iter()
                    .find(|r| r.id == id)
                    .map_or(id, |r| r.name.as_str())
            })
            .collect();
        if !names.is_empty() {
            out.inline_list(2, "规则", &names, "、");
        }
        out.code_location(2, step.code_ref.as_ref());
    }
}

fn emit_rule(out: &mut Outline, rule: &Rule) {
    out.heading(5, titled(&rule.name, &rule.id));
    out.bullet(0, format!("优先级：{}", rule.priority.label()));
    out.field(0, "分类", rule.category.as_deref());
    out.field(0, "描述", rule.description.as_deref());

    for (label, items) in [("约束", &rule.constraints), ("效果", &rule.effects)] {
        let items = dedupe(items);
        out.bullet(0, format!("{label}（{}）", items.len()));
        for item in items {
            out.bullet(1, esc(item));
        }
    }

    if !rule.impacted_fields.is_empty() {
        out.inline_list(0, "影响字段", &rule.impacted_fields, "、");
    }
    out.code_location(0, rule.code_ref.as_ref());
}

fn emit_state_machine(out: &mut Outline, machine: &StateMachine) {
    out.heading(5, titled(&machine.name, &machine.id));
    out.field(0, "实体", machine.entity.as_deref());
    out.field(0, "描述", machine.description.as_deref());

    out.bullet(0, format!("状态（{}）", machine.states.len()));
    for state in &machine.states {
        let mut line = esc(&state.name);
        if state.initial {
            line.push_str("（初始）");
        }
        if state.is_final {
            line.push_str("（终止）");
        }
        out.bullet(1, line);
        out.field(2, "说明", state.description.as_deref());
    }

    let name_of = |id: &str| -> String {
        esc(machine.state(id).map_or(id, |s| s.name.as_str()))
    };

    out.bullet(0, format!("转换（{}）", machine.transitions.len()));
    for transition in &machine.transitions {
        let mut line = format!("{} → {}", name_of(&transition.from), name_of(&transition.to));
        if let Some(trigger) = transition.trigger.as_deref().filter(|t| !t.trim().is_empty()) {
            line.push('：');
            line.push_str(&esc(trigger));
        }
        out.bullet(1, line);
        out.field(2, "说明", transition.description.as_deref());
    }
}

fn emit_pseudocode(out: &mut Outline, pseudo: &Pseudocode) {
    out.heading(5, titled(&pseudo.name, &pseudo.id));
    out.field(0, "描述", pseudo.description.as_deref());
    if let Some(signature) = pseudo.signature.as_deref().filter(|s| !s.is_empty()) {
        out.bullet(0, format!("签名：{}", inline_code(signature)));
    }

    out.bullet(0, format!("参数（{}）", pseudo.params.len()));
    for param in &pseudo.params {
        let mut line = esc(&param.name);
        if let Some(ty) = param.ty.as_deref().filter(|t| !t.is_empty()) {
            line.push_str(": ");
            line.push_str(&esc(ty));
        }
        if let Some(description) = param.description.as_deref().filter(|d| !d.is_empty()) {
            line.push('，');
            line.push_str(&esc(description));
        }
        out.bullet(1, line);
    }

    out.field(0, "返回", pseudo.returns.as_deref());
    out.code_location(0, pseudo.code_ref.as_ref());

    out.bullet(0, format!("步骤（{}）", pseudo.steps.len()));
    for step in &pseudo.steps {
        out.bullet(
            step.indent.saturating_add(1),
            format!("【{}】{}", step.kind.label(), esc(&step.text)),
        );
    }

    out.bullet(0, format!("外部调用（{}）", pseudo.calls.len()));
    for call in &pseudo.calls {
        let mut line = format!("{}：{}", call.kind.label(), esc(&call.target));
        if let Some(description) = call.description.as_deref().filter(|d| !d.is_empty()) {
            line.push('，');
            line.push_str(&esc(description));
        }
        out.bullet(1, line);
    }
}

fn emit_entity(out: &mut Outline, entity: &Entity) {
    out.heading(3, titled(&entity.name, &entity.id));
    out.field(0, "描述", entity.description.as_deref());
    out.inline_list(0, "关键字段", &entity.key_fields, "、");
    out.inline_list(0, "状态", &entity.statuses, " / ");
}

fn emit_data_model(out: &mut Outline, model: &DataModel) {
    out.heading(3, titled(&model.name, &model.id));
    out.field(0, "描述", model.description.as_deref());
    out.bullet(0, format!("字段（{}）", model.fields.len()));
    for field in &model.fields {
        let mut line = format!("{}: {}", esc(&field.name), esc(&field.ty));
        if let Some(description) = field.description.as_deref().filter(|d| !d.is_empty()) {
            line.push('，');
            line.push_str(&esc(description));
        }
        out.bullet(1, line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ChangelogEntry, GlossaryEntry, PseudoStep, PseudoStepKind, State};
    use crate::emit::lines::MAX_NESTED_DEPTH;
    use crate::test_support::{flow, rule, sample_manifest, state, state_machine, step, transition};

    #[test]
    fn test_empty_manifest_announces_counts() {
        let out = outline(&Manifest::default());
        for heading in [
            "## 模块（0）",
            "## 实体（0）",
            "## 数据模型（0）",
            "## 术语表（0）",
            "## 变更记录（0）",
        ] {
            assert!(out.contains(heading), "missing {heading}");
        }
    }

    #[test]
    fn test_section_order() {
        let out = outline(&sample_manifest());
        let positions: Vec<usize> = ["## 模块", "## 实体", "## 数据模型", "## 术语表", "## 变更记录"]
            .iter()
            .map(|h| out.find(h).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_module_sections() {
        let out = outline(&sample_manifest());
        assert!(out.contains("### 订单（order）"));
        assert!(out.contains("#### 流程（1）"));
        assert!(out.contains("#### 规则（1）"));
        assert!(out.contains("#### 状态机（1）"));
        assert!(out.contains("#### 伪代码（1）"));
        assert!(out.contains("- 依赖（2）：payment、inventory"));
        assert!(out.contains("- 代码（1）\n  - `src/order/service.ts`"));
    }

    #[test]
    fn test_flow_steps_ordered_with_rules() {
        let mut second = step(2, "pay");
        second.rules = vec!["r1".into(), "unknown".into()];
        let mut module = Module {
            id: "m".into(),
            name: "M".into(),
            flows: vec![flow("f1", vec![second, step(1, "create")])],
            rules: vec![rule("r1", "Stock")],
            ..Default::default()
        };
        module.flows[0].trigger = Some("POST /orders".into());
        let manifest = Manifest {
            modules: vec![module],
            ..Default::default()
        };

        let out = outline(&manifest);
        let create = out.find("第1步：create").unwrap();
        let pay = out.find("第2步：pay").unwrap();
        assert!(create < pay);
        assert!(out.contains("    - 规则（2）：Stock、unknown"));
        assert!(out.contains("- 触发：POST /orders"));
    }

    #[test]
    fn test_state_tags_and_transitions() {
        let machine = state_machine(
            vec![
                State {
                    initial: true,
                    ..state("new", "新建")
                },
                State {
                    is_final: true,
                    ..state("done", "完成")
                },
            ],
            vec![transition("new", "done", Some("finish")), transition("new", "ghost", None)],
        );
        let manifest = Manifest {
            modules: vec![Module {
                id: "m".into(),
                name: "M".into(),
                state_machines: vec![machine],
                ..Default::default()
            }],
            ..Default::default()
        };

        let out = outline(&manifest);
        assert!(out.contains("  - 新建（初始）"));
        assert!(out.contains("  - 完成（终止）"));
        assert!(out.contains("  - 新建 → 完成：finish"));
        assert!(out.contains("  - 新建 → ghost"));
    }

    #[test]
    fn test_pseudocode_indentation() {
        let pseudo = Pseudocode {
            id: "p".into(),
            name: "create".into(),
            signature: Some("create(order: Order)".into()),
            steps: vec![
                PseudoStep {
                    indent: 0,
                    kind: PseudoStepKind::Condition,
                    text: "if stock[0] > 0".into(),
                },
                PseudoStep {
                    indent: 1,
                    kind: PseudoStepKind::Return,
                    text: "ok".into(),
                },
            ],
            ..Default::default()
        };
        let manifest = Manifest {
            modules: vec![Module {
                id: "m".into(),
                name: "M".into(),
                pseudocodes: vec![pseudo],
                ..Default::default()
            }],
            ..Default::default()
        };

        let out = outline(&manifest);
        assert!(out.contains("- 签名：`create(order: Order)`"));
        assert!(out.contains("\n  - 【条件】if stock［0］ > 0\n    - 【返回】ok\n"));
        assert!(out.contains("- 参数（0）"));
        assert!(out.contains("- 外部调用（0）"));
    }

    #[test]
    fn test_free_text_is_escaped() {
        let mut manifest = Manifest::default();
        manifest.project.name = "Shop (beta) [v2]".into();
        manifest.glossary.insert(
            "sku".into(),
            GlossaryEntry {
                term: "SKU".into(),
                description: "stock \"keeping\"\nunit".into(),
            },
        );

        let out = outline(&manifest);
        assert!(out.starts_with("# Shop （beta） ［v2］\n"));
        assert!(out.contains("- SKU（sku）：stock 'keeping'<br/>unit"));
    }

    #[test]
    fn test_inline_code_with_backtick() {
        let mut manifest = Manifest::default();
        manifest.modules.push(Module {
            id: "m".into(),
            name: "M".into(),
            pseudocodes: vec![Pseudocode {
                id: "p".into(),
                name: "p".into(),
                signature: Some("fn `raw`()".into()),
                ..Default::default()
            }],
            ..Default::default()
        });

        let out = outline(&manifest);
        assert!(out.contains("- 签名：`` fn `raw`() ``"));
    }

    #[test]
    fn test_multiline_code_text_stays_on_one_bullet() {
        let pseudo = Pseudocode {
            id: "p".into(),
            name: "create".into(),
            signature: Some("create(\n# order: Order)".into()),
            code_ref: Some(CodeRef::new("src/order\n# service.ts")),
            ..Default::default()
        };
        let manifest = Manifest {
            modules: vec![Module {
                id: "m".into(),
                name: "M".into(),
                pseudocodes: vec![pseudo],
                ..Default::default()
            }],
            ..Default::default()
        };

        let out = outline(&manifest);
        assert!(out.contains("- 签名：`create(<br/># order: Order)`"));
        assert!(out.contains("- 代码位置：`src/order<br/># service.ts`"));
        assert!(!out.lines().any(|l| l.starts_with("# order") || l.starts_with("# service")));
    }

    #[test]
    fn test_huge_pseudo_indent_is_capped() {
        let pseudo = Pseudocode {
            id: "p".into(),
            name: "p".into(),
            steps: vec![PseudoStep {
                indent: usize::MAX,
                kind: PseudoStepKind::Action,
                text: "deep".into(),
            }],
            ..Default::default()
        };
        let manifest = Manifest {
            modules: vec![Module {
                id: "m".into(),
                name: "M".into(),
                pseudocodes: vec![pseudo],
                ..Default::default()
            }],
            ..Default::default()
        };

        let out = outline(&manifest);
        let line = out.lines().find(|l| l.ends_with("deep")).unwrap();
        assert_eq!(line.len() - line.trim_start().len(), 2 * MAX_NESTED_DEPTH);
    }

    #[test]
    fn test_changelog_and_catalogs() {
        let out = outline(&sample_manifest());
        assert!(out.contains("## 变更记录（1）\n- 2024-05-01 · added · 初始版本"));
        assert!(out.contains("- 状态（3）：pending / paid / closed"));
        assert!(out.contains("  - id: uuid，主键"));
    }

    #[test]
    fn test_heading_depth_capped() {
        let mut out = Outline::new();
        out.heading(9, "deep");
        assert_eq!(out.finish(), "###### deep\n");
    }

    #[test]
    fn test_changelog_entry_fields() {
        let manifest = Manifest {
            changelog: vec![ChangelogEntry {
                date: "2024-01-01".into(),
                kind: "fixed".into(),
                summary: "typo (minor)".into(),
            }],
            ..Default::default()
        };
        assert!(outline(&manifest).contains("- 2024-01-01 · fixed · typo （minor）"));
    }

    #[test]
    fn test_deterministic() {
        let manifest = sample_manifest();
        assert_eq!(outline(&manifest), outline(&manifest));
    }
}
