//! Call-site filter evaluation.
//!
//! Decides whether an intercepted invocation should be logged, based on
//! whether any frame of the calling context lies under the configured
//! source prefixes. With filtering disabled the evaluator answers without
//! touching the snapshot; that fast path is what keeps interception cheap
//! by default.

use hooklog_stack::CallStack;

use crate::config::DispatchConfig;

/// Returns whether the calling context warrants a log line.
///
/// With filtering disabled this is `true` unconditionally. With filtering
/// enabled, at least one frame descriptor must start with one of the
/// configured prefixes, so an empty snapshot is suppressed.
#[must_use]
pub fn should_log(config: &DispatchConfig, stack: &CallStack) -> bool {
    if !config.filter_enabled() {
        return true;
    }
    stack
        .frames()
        .iter()
        .any(|frame| matches_filter(config, &frame.to_string()))
}

/// Returns whether one frame descriptor lies under a configured prefix.
///
/// Matching is a plain byte prefix test, not path-segment aware: a frame
/// under `{root}/apparatus/` also matches the `{root}/app` prefix. The
/// prefix set is built from literal directory names, and the looseness is
/// accepted rather than tightened.
#[must_use]
pub fn matches_filter(config: &DispatchConfig, descriptor: &str) -> bool {
    config
        .filter_prefixes()
        .iter()
        .any(|prefix| descriptor.starts_with(prefix))
}
