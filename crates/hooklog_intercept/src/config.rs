//! Immutable dispatch configuration.
//!
//! [`DispatchConfig`] is built once, before any invocation flows through an
//! interceptor, and never mutated afterwards. Concurrent invocations from
//! any number of threads read it without synchronization; the only lazily
//! populated piece is the filter-prefix cache, which sits behind a
//! [`OnceLock`] and is identical no matter which thread wins the race.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use crate::template::LogTemplate;

/// Environment variable enabling call-site filtering when set non-empty.
pub const FILTER_ENV: &str = "HOOKLOG_FILTER";

/// Environment variable overriding the log line template.
pub const FORMAT_ENV: &str = "HOOKLOG_FORMAT";

/// Root-relative directories considered in scope for filtered logging.
///
/// A literal, fixed set — resolved against the application root once and
/// cached for the process lifetime.
pub const SOURCE_DIRS: &[&str] = &["app", "lib"];

// ─────────────────────────────────────────────────────────────────────────────
// DispatchConfig
// ─────────────────────────────────────────────────────────────────────────────

/// Immutable configuration for dispatch interception.
///
/// Filtering is very expensive — capturing and matching a call stack on
/// every hook invocation can slow a consuming test suite by half — so it
/// is off by default and only switched on through [`FILTER_ENV`] or
/// [`with_filter`](Self::with_filter).
///
/// # Example
///
/// ```
/// use hooklog_intercept::config::DispatchConfig;
/// use hooklog_intercept::template::LogTemplate;
///
/// let config = DispatchConfig::new("/srv/host")
///     .with_filter(true)
///     .with_format(LogTemplate::new("Callback %s at %s:%s"));
///
/// assert!(config.filter_enabled());
/// assert_eq!(config.filter_prefixes(), ["/srv/host/app", "/srv/host/lib"]);
/// ```
#[derive(Debug)]
pub struct DispatchConfig {
    /// Whether call-site filtering is active.
    filter_enabled: bool,
    /// Template for emitted log lines.
    format: LogTemplate,
    /// Application root the filter prefixes resolve against.
    root: PathBuf,
    /// Lazily computed absolute prefixes, populated at most once.
    prefixes: OnceLock<Vec<String>>,
}

impl DispatchConfig {
    /// Creates a configuration with defaults: filtering disabled, the
    /// default template, prefixes resolved against `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            filter_enabled: false,
            format: LogTemplate::default(),
            root: root.into(),
            prefixes: OnceLock::new(),
        }
    }

    /// Reads the process environment once and builds a configuration.
    ///
    /// [`FILTER_ENV`] set to a non-empty value enables filtering;
    /// [`FORMAT_ENV`] overrides the log line template.
    #[must_use]
    pub fn from_env(root: impl Into<PathBuf>) -> Self {
        Self::from_lookup(root, |name| std::env::var(name).ok())
    }

    /// Builds a configuration from an arbitrary variable lookup.
    ///
    /// This is the seam [`from_env`](Self::from_env) goes through; tests
    /// use it to stay off the global process environment.
    #[must_use]
    pub fn from_lookup(
        root: impl Into<PathBuf>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let filter_enabled = lookup(FILTER_ENV).is_some_and(|value| !value.is_empty());
        let format = lookup(FORMAT_ENV).map_or_else(LogTemplate::default, LogTemplate::new);
        Self {
            filter_enabled,
            format,
            root: root.into(),
            prefixes: OnceLock::new(),
        }
    }

    /// Sets whether call-site filtering is active.
    #[must_use]
    pub fn with_filter(mut self, enabled: bool) -> Self {
        self.filter_enabled = enabled;
        self
    }

    /// Sets the log line template.
    #[must_use]
    pub fn with_format(mut self, format: LogTemplate) -> Self {
        self.format = format;
        self
    }

    /// Returns whether call-site filtering is active.
    #[must_use]
    pub fn filter_enabled(&self) -> bool {
        self.filter_enabled
    }

    /// Returns the log line template.
    #[must_use]
    pub fn format(&self) -> &LogTemplate {
        &self.format
    }

    /// Returns the application root the filter prefixes resolve against.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the in-scope path prefixes, computing them on first use.
    ///
    /// The prefixes are [`SOURCE_DIRS`] joined onto the root. The root does
    /// not change at runtime, so the value is computed at most once; a
    /// racing duplicate computation publishes an identical value.
    #[must_use]
    pub fn filter_prefixes(&self) -> &[String] {
        self.prefixes.get_or_init(|| {
            SOURCE_DIRS
                .iter()
                .map(|dir| self.root.join(dir).to_string_lossy().into_owned())
                .collect()
        })
    }
}
