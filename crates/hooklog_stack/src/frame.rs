//! Call-stack frame descriptors.

use core::fmt;

/// One active call site: file path, line number, and enclosing label.
///
/// Rendering via [`Display`](fmt::Display) produces the canonical
/// descriptor form `` file:line:in `label' ``, which is the string the
/// call-site filter matches path prefixes against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Source file path of the call site.
    file: String,
    /// Line number of the call site.
    line: u32,
    /// Name of the enclosing function or method.
    label: String,
}

impl Frame {
    /// Creates a frame from its parts.
    #[must_use]
    pub fn new(file: impl Into<String>, line: u32, label: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            line,
            label: label.into(),
        }
    }

    /// Returns the source file path of the call site.
    #[must_use]
    pub fn file(&self) -> &str {
        &self.file
    }

    /// Returns the line number of the call site.
    #[must_use]
    pub fn line(&self) -> u32 {
        self.line
    }

    /// Returns the name of the enclosing function or method.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:in `{}'", self.file, self.line, self.label)
    }
}
