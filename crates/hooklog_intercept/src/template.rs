//! Log line templates.
//!
//! A [`LogTemplate`] turns one intercepted invocation into one log line.
//! Placeholders are `%s`-style and filled in order with the hook method
//! identifier, the defining source file, and the defining line.

use core::fmt;

use hooklog_stack::SourceLocation;

/// Default log line template.
pub const DEFAULT_TEMPLATE: &str = "Callback %s";

// ─────────────────────────────────────────────────────────────────────────────
// LogTemplate
// ─────────────────────────────────────────────────────────────────────────────

/// A `%s`-style template for emitted log lines.
///
/// `%s` placeholders are filled in order with the hook method identifier,
/// the defining source file, and the defining line; `%%` renders a literal
/// percent. A template may use fewer placeholders than there are values —
/// the default [`DEFAULT_TEMPLATE`] ignores the location — but not more
/// than three.
///
/// # Example
///
/// ```
/// use hooklog_intercept::template::LogTemplate;
/// use hooklog_stack::SourceLocation;
///
/// let location = SourceLocation::new("app/models/user.rb", 14);
///
/// let plain = LogTemplate::default();
/// assert_eq!(plain.render("before_save", &location).unwrap(), "Callback before_save");
///
/// let located = LogTemplate::new("Callback %s at %s:%s");
/// assert_eq!(
///     located.render("before_save", &location).unwrap(),
///     "Callback before_save at app/models/user.rb:14",
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogTemplate {
    /// Raw template text.
    raw: String,
}

impl LogTemplate {
    /// Creates a template from its raw text.
    ///
    /// The text is not validated up front; a malformed template surfaces
    /// as a [`TemplateError`] at render time and the affected line is
    /// dropped rather than failing the wrapped call.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    /// Returns the raw template text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Renders one log line for a hook invocation.
    ///
    /// # Errors
    ///
    /// Returns a [`TemplateError`] if the template uses a directive other
    /// than `%s`/`%%`, ends mid-directive, or asks for more than the three
    /// available values.
    pub fn render(
        &self,
        method: &str,
        location: &SourceLocation,
    ) -> Result<String, TemplateError> {
        let line = location.line().to_string();
        let values = [method, location.file(), line.as_str()];

        let mut out = String::with_capacity(self.raw.len() + method.len());
        let mut next = 0;
        let mut chars = self.raw.chars();
        while let Some(ch) = chars.next() {
            if ch != '%' {
                out.push(ch);
                continue;
            }
            match chars.next() {
                Some('s') => {
                    let value = values.get(next).ok_or(TemplateError::MissingValue {
                        placeholder: next + 1,
                    })?;
                    out.push_str(value);
                    next += 1;
                }
                Some('%') => out.push('%'),
                Some(directive) => return Err(TemplateError::UnknownDirective { directive }),
                None => return Err(TemplateError::TrailingPercent),
            }
        }
        Ok(out)
    }
}

impl Default for LogTemplate {
    fn default() -> Self {
        Self::new(DEFAULT_TEMPLATE)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// TemplateError
// ─────────────────────────────────────────────────────────────────────────────

/// Errors that can occur while rendering a log line.
///
/// Rendering failures are recovered by the interceptor: the affected line
/// is suppressed and the wrapped dispatcher still runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// The template used a directive other than `%s` or `%%`.
    UnknownDirective {
        /// The unrecognized directive character.
        directive: char,
    },
    /// The template ended in the middle of a directive.
    TrailingPercent,
    /// The template asked for more values than an invocation carries.
    MissingValue {
        /// 1-based index of the placeholder that had no value.
        placeholder: usize,
    },
}

impl fmt::Display for TemplateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateError::UnknownDirective { directive } => {
                write!(f, "unknown template directive: %{directive}")
            }
            TemplateError::TrailingPercent => write!(f, "template ends mid-directive"),
            TemplateError::MissingValue { placeholder } => {
                write!(f, "no value for placeholder {placeholder}")
            }
        }
    }
}

impl core::error::Error for TemplateError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn location() -> SourceLocation {
        SourceLocation::new("/app/app/models/user.rb", 10)
    }

    #[test]
    fn default_template_renders_method_only() {
        let rendered = LogTemplate::default().render("before_save", &location());
        assert_eq!(rendered.unwrap(), "Callback before_save");
    }

    #[test]
    fn placeholders_fill_in_order() {
        let template = LogTemplate::new("%s defined at %s:%s");
        assert_eq!(
            template.render("before_save", &location()).unwrap(),
            "before_save defined at /app/app/models/user.rb:10",
        );
    }

    #[test]
    fn double_percent_renders_literal_percent() {
        let template = LogTemplate::new("100%% %s");
        assert_eq!(template.render("save", &location()).unwrap(), "100% save");
    }

    #[test]
    fn unknown_directive_is_an_error() {
        let template = LogTemplate::new("Callback %d");
        assert_eq!(
            template.render("save", &location()),
            Err(TemplateError::UnknownDirective { directive: 'd' }),
        );
    }

    #[test]
    fn trailing_percent_is_an_error() {
        let template = LogTemplate::new("Callback %");
        assert_eq!(
            template.render("save", &location()),
            Err(TemplateError::TrailingPercent),
        );
    }

    #[test]
    fn fourth_placeholder_is_an_error() {
        let template = LogTemplate::new("%s %s %s %s");
        assert_eq!(
            template.render("save", &location()),
            Err(TemplateError::MissingValue { placeholder: 4 }),
        );
    }

    #[test]
    fn errors_display() {
        assert_eq!(
            TemplateError::UnknownDirective { directive: 'd' }.to_string(),
            "unknown template directive: %d",
        );
        assert_eq!(
            TemplateError::MissingValue { placeholder: 4 }.to_string(),
            "no value for placeholder 4",
        );
    }
}
