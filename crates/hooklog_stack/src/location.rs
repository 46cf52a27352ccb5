//! Source locations of method definitions.

use core::fmt;

/// The file and line where a method was originally defined.
///
/// Distinct from a [`Frame`](crate::frame::Frame): a frame describes where
/// a call is happening, a `SourceLocation` describes where the invoked
/// method lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    /// Path of the defining source file.
    file: String,
    /// Line of the definition.
    line: u32,
}

impl SourceLocation {
    /// Creates a location from its parts.
    #[must_use]
    pub fn new(file: impl Into<String>, line: u32) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }

    /// Returns the path of the defining source file.
    #[must_use]
    pub fn file(&self) -> &str {
        &self.file
    }

    /// Returns the line of the definition.
    #[must_use]
    pub fn line(&self) -> u32 {
        self.line
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}
