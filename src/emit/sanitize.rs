//! Identifier and label sanitization for the diagram dialects.
//!
//! Every literal string that reaches emitted text goes through one of these
//! functions, and every node identifier is minted by [`make_node_id`].

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::core::CodeRef;

/// Characters not allowed in a flow-diagram identifier.
static NON_IDENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_]").expect("valid identifier regex"));

/// Line-break token understood inside quoted flow-diagram labels.
pub const LINE_BREAK: &str = "<br/>";

/// Mint a node identifier from a human-readable id.
///
/// Every character outside `[A-Za-z0-9_]` becomes `_`, an empty id becomes
/// `x`, and a leading digit gets an `_` in front, then `prefix` is
/// prepended.
///
/// Distinct ids can map to the same node id (`a-b` and `a.b` both give
/// `a_b`). Callers do not disambiguate; `lint` reports such collisions.
pub fn make_node_id(prefix: &str, raw: &str) -> String {
    let mut body = NON_IDENT.replace_all(raw, "_").into_owned();
    if body.is_empty() {
        body.push('x');
    }
    if body.starts_with(|c: char| c.is_ascii_digit()) {
        body.insert(0, '_');
    }
    format!("{prefix}{body}")
}

/// Escape text for a double-quoted flow-diagram label.
pub fn escape_label(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('"', "'")
        .replace("\r\n", LINE_BREAK)
        .replace('\n', LINE_BREAK)
}

/// Escape text for the outline dialect.
///
/// On top of [`escape_label`], brackets and parentheses become their
/// full-width forms since the outline dialect reads them as node shapes.
pub fn escape_outline_text(text: &str) -> String {
    escape_label(text)
        .chars()
        .map(|c| match c {
            '(' => '（',
            ')' => '）',
            '[' => '［',
            ']' => '］',
            other => other,
        })
        .collect()
}

/// Format a code reference as `file:function:line`, skipping absent parts.
///
/// Returns an empty string for `None`; callers skip the line entirely.
pub fn format_code_ref(code_ref: Option<&CodeRef>) -> String {
    let Some(code_ref) = code_ref else {
        return String::new();
    };

    let mut parts = vec![code_ref.file.clone()];
    if let Some(function) = code_ref.function.as_deref().filter(|f| !f.is_empty()) {
        parts.push(function.to_string());
    }
    if let Some(line) = code_ref.line {
        parts.push(line.to_string());
    }
    parts.join(":")
}

/// Drop blank entries and duplicates, keeping first-seen order.
pub fn dedupe<S: AsRef<str>>(items: &[S]) -> Vec<&str> {
    let mut seen = HashSet::new();
    items
        .iter()
        .map(AsRef::as_ref)
        .filter(|s| !s.trim().is_empty())
        .filter(|s| seen.insert(*s))
        .collect()
}

/// Wrap text in inline-code delimiters.
///
/// Line breaks become [`LINE_BREAK`] so the span stays on one line. Text
/// that already contains a backtick gets doubled delimiters with padding so
/// the inner backtick does not close the span.
pub fn inline_code(text: &str) -> String {
    let text = text
        .replace("\r\n", LINE_BREAK)
        .replace(['\r', '\n'], LINE_BREAK);
    if text.contains('`') {
        format!("`` {text} ``")
    } else {
        format!("`{text}`")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_make_node_id() {
        assert_eq!(make_node_id("mod_", "order"), "mod_order");
        assert_eq!(make_node_id("mod_", "order-item.v2"), "mod_order_item_v2");
        assert_eq!(make_node_id("mod_", "2fa"), "mod__2fa");
        assert_eq!(make_node_id("mod_", ""), "mod_x");
    }

    #[test]
    fn test_make_node_id_non_ascii() {
        // Each char is replaced, so the body is never empty for non-empty input
        assert_eq!(make_node_id("mod_", "订单"), "mod___");
    }

    #[test]
    fn test_make_node_id_common_case_distinct() {
        let ids = ["order", "order_item", "payment", "Order"];
        let minted: HashSet<_> = ids.iter().map(|id| make_node_id("mod_", id)).collect();
        assert_eq!(minted.len(), ids.len());

        // Module and external namespaces never meet
        assert_ne!(make_node_id("mod_", "a_b"), make_node_id("ext_", "a_b"));
    }

    #[test]
    fn test_make_node_id_known_collision() {
        assert_eq!(make_node_id("mod_", "a-b"), make_node_id("mod_", "a.b"));
    }

    #[test]
    fn test_escape_label() {
        assert_eq!(escape_label(r#"say "hi""#), "say 'hi'");
        assert_eq!(escape_label(r"C:\tmp"), r"C:\\tmp");
        assert_eq!(escape_label("a\nb\r\nc"), "a<br/>b<br/>c");
    }

    #[test]
    fn test_escape_outline_text() {
        let escaped = escape_outline_text("f(x) [draft] \"q\"\nnext");
        assert_eq!(escaped, "f（x） ［draft］ 'q'<br/>next");
        for reserved in ['(', ')', '[', ']', '"', '\n'] {
            assert!(!escaped.contains(reserved), "found {reserved:?}");
        }
    }

    #[test]
    fn test_format_code_ref() {
        assert_eq!(format_code_ref(None), "");
        assert_eq!(format_code_ref(Some(&CodeRef::new("src/a.ts"))), "src/a.ts");
        assert_eq!(
            format_code_ref(Some(&CodeRef::new("src/a.ts").with_function("run").with_line(12))),
            "src/a.ts:run:12"
        );
        assert_eq!(
            format_code_ref(Some(&CodeRef::new("src/a.ts").with_line(7))),
            "src/a.ts:7"
        );
    }

    #[test]
    fn test_dedupe() {
        let items = vec!["b", "", "a", "b", "  ", "c", "a"];
        assert_eq!(dedupe(&items), ["b", "a", "c"]);
    }

    #[test]
    fn test_inline_code() {
        assert_eq!(inline_code("src/main.rs"), "`src/main.rs`");
        assert_eq!(inline_code("fn `x`"), "`` fn `x` ``");
    }

    #[test]
    fn test_inline_code_stays_on_one_line() {
        assert_eq!(inline_code("create(\n# order)"), "`create(<br/># order)`");
        assert_eq!(inline_code("a\r\nb\rc"), "`a<br/>b<br/>c`");
    }
}
