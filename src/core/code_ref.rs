//! Source locations attached to manifest entries.

use serde::{Deserialize, Serialize};

/// A file/function/line locator.
///
/// Purely informational: it is formatted into display text and never
/// resolved against a real source tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeRef {
    /// Path of the file, relative to the project root
    pub file: String,

    /// Function or method name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function: Option<String>,

    /// 1-based line number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
}

impl CodeRef {
    /// Create a reference to a whole file.
    pub fn new(file: impl Into<String>) -> Self {
        CodeRef {
            file: file.into(),
            function: None,
            line: None,
        }
    }

    /// Attach a function name.
    pub fn with_function(mut self, function: impl Into<String>) -> Self {
        self.function = Some(function.into());
        self
    }

    /// Attach a line number.
    pub fn with_line(mut self, line: u32) -> Self {
        self.line = Some(line);
        self
    }
}
