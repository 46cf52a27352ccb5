//! Logging sinks.
//!
//! A [`LogSink`] is the destination an interceptor writes its lines to.
//! The default is [`StdoutSink`], so interception is never silently broken
//! for lack of a configured destination; hosts running a `tracing`
//! subscriber hand in [`TracingSink`] instead.

use std::io::Write;
use std::sync::Arc;

use parking_lot::Mutex;

/// Destination for emitted log lines.
///
/// Sinks accept a single message at debug severity and are infallible by
/// contract: an implementation swallows its own I/O trouble, so sink
/// failures can never reach the wrapped call path. Sinks must be shareable
/// across whatever threads the host dispatches hooks on.
pub trait LogSink: Send + Sync {
    /// Writes one message at debug severity.
    fn debug(&self, message: &str);
}

impl<S: LogSink + ?Sized> LogSink for Arc<S> {
    fn debug(&self, message: &str) {
        (**self).debug(message);
    }
}

/// Sink writing each message as one line to standard output.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutSink;

impl LogSink for StdoutSink {
    fn debug(&self, message: &str) {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        let _ = writeln!(handle, "{message}");
    }
}

/// Sink forwarding each message to [`tracing::debug!`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn debug(&self, message: &str) {
        tracing::debug!(target: "hooklog", "{message}");
    }
}

/// Sink recording every message in memory, oldest first.
///
/// For test suites asserting on emitted lines; share it with an
/// interceptor through an [`Arc`].
#[derive(Debug, Default)]
pub struct MemorySink {
    /// Recorded messages.
    messages: Mutex<Vec<String>>,
}

impl MemorySink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the messages recorded so far.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().clone()
    }

    /// Returns the number of messages recorded so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.lock().len()
    }

    /// Returns `true` if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.lock().is_empty()
    }
}

impl LogSink for MemorySink {
    fn debug(&self, message: &str) {
        self.messages.lock().push(message.to_owned());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_sink_records_in_order() {
        let sink = MemorySink::new();
        sink.debug("first");
        sink.debug("second");
        assert_eq!(sink.messages(), vec!["first", "second"]);
        assert_eq!(sink.len(), 2);
        assert!(!sink.is_empty());
    }

    #[test]
    fn arc_sink_forwards_to_inner() {
        let sink = Arc::new(MemorySink::new());
        let shared: Arc<MemorySink> = Arc::clone(&sink);
        shared.debug("via arc");
        assert_eq!(sink.messages(), vec!["via arc"]);
    }

    #[test]
    fn stdout_sink_does_not_panic() {
        StdoutSink.debug("Callback before_save");
    }
}
