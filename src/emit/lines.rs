//! Ordered line accumulation for emitters.

/// Indentation unit for nested diagram statements.
const INDENT: &str = "    ";

/// Deepest nesting level [`Lines::nested`] will indent to.
pub const MAX_NESTED_DEPTH: usize = 32;

/// An ordered sequence of output lines, joined once at the end.
#[derive(Debug, Default)]
pub struct Lines {
    lines: Vec<String>,
}

impl Lines {
    /// Start with a header line such as `flowchart TD`.
    pub fn with_header(header: impl Into<String>) -> Self {
        Lines {
            lines: vec![header.into()],
        }
    }

    /// Append a line as-is.
    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    /// Append a statement one indentation level deep.
    pub fn stmt(&mut self, line: impl AsRef<str>) {
        self.lines.push(format!("{INDENT}{}", line.as_ref()));
    }

    /// Append a line indented by `depth` levels of two spaces, capped at
    /// [`MAX_NESTED_DEPTH`].
    pub fn nested(&mut self, depth: usize, line: impl AsRef<str>) {
        let depth = depth.min(MAX_NESTED_DEPTH);
        self.lines
            .push(format!("{}{}", "  ".repeat(depth), line.as_ref()));
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Join all lines, newline-terminated.
    pub fn finish(self) -> String {
        let mut out = self.lines.join("\n");
        out.push('\n');
        out
    }
}
