//! The invocation interceptor.
//!
//! [`Interceptor`] decorates dispatchers produced by the host's chain
//! builder: every call through a wrapped dispatcher passes an observation
//! step — filter gate, source-location resolution, one debug line — and
//! then delegates to the original with its arguments and result untouched.
//!
//! # Design Principles
//!
//! - Purely observational: no argument, return value, or error path of the
//!   wrapped dispatcher is ever altered
//! - Cheap when unfiltered: the call stack is not even captured unless
//!   filtering is enabled
//! - Observation failures (unresolvable method, malformed template) drop
//!   the log line, never the call
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use hooklog_intercept::config::DispatchConfig;
//! use hooklog_intercept::interceptor::{BoxedDispatcher, Interceptor};
//! use hooklog_intercept::protocol::{ChainCall, MethodTable};
//! use hooklog_intercept::sink::MemorySink;
//! use hooklog_stack::SourceLocation;
//!
//! let sink = Arc::new(MemorySink::new());
//! let interceptor = Interceptor::new(DispatchConfig::new("/srv/host"))
//!     .with_sink(Arc::clone(&sink));
//!
//! // The host's chain builder produced this dispatcher:
//! let original: BoxedDispatcher<ChainCall, (), String> = Box::new(|_call| Ok(()));
//! let wrapped = interceptor.wrap_chain(original);
//!
//! let call = ChainCall {
//!     target: Arc::new(MethodTable::new().define(
//!         "before_save",
//!         SourceLocation::new("/srv/host/app/models/user.rs", 10),
//!     )),
//!     method: "before_save".into(),
//!     values: Vec::new(),
//!     continuation: None,
//! };
//! wrapped(&call).unwrap();
//! assert_eq!(sink.messages(), vec!["Callback before_save".to_string()]);
//! ```

use std::sync::Arc;

use hooklog_stack::{CallStack, RuntimeStack, StackSource};

use crate::config::DispatchConfig;
use crate::filter;
use crate::protocol::{
    ArgumentExtractor, ChainCall, ChainExtractor, Invocation, TemplateCall, TemplateExtractor,
};
use crate::sink::{LogSink, StdoutSink};

/// Type-erased dispatcher as produced by the host's chain builder.
///
/// A dispatcher performs the actual callback execution for one argument
/// pack and either returns the callback's result or surfaces its failure.
pub type BoxedDispatcher<A, R, E> = Box<dyn Fn(&A) -> Result<R, E> + Send + Sync>;

// ─────────────────────────────────────────────────────────────────────────────
// Interceptor
// ─────────────────────────────────────────────────────────────────────────────

/// Decorates dispatchers with per-invocation debug logging.
///
/// Holds the immutable [`DispatchConfig`] plus two injected collaborators:
/// the [`LogSink`] lines are written to (default [`StdoutSink`]) and the
/// [`StackSource`] the calling context is snapshotted from (default
/// [`RuntimeStack`]). Construction happens once at setup time; wrapping is
/// then available for each builder instance the host wants observed.
pub struct Interceptor {
    /// Immutable configuration shared with every wrapped dispatcher.
    config: Arc<DispatchConfig>,
    /// Destination for emitted lines.
    sink: Arc<dyn LogSink>,
    /// Where calling-context snapshots come from.
    stack: Arc<dyn StackSource>,
}

impl Interceptor {
    /// Creates an interceptor over `config` with the default
    /// collaborators: [`StdoutSink`] and the live [`RuntimeStack`].
    #[must_use]
    pub fn new(config: DispatchConfig) -> Self {
        Self {
            config: Arc::new(config),
            sink: Arc::new(StdoutSink),
            stack: Arc::new(RuntimeStack),
        }
    }

    /// Replaces the logging sink.
    #[must_use]
    pub fn with_sink(mut self, sink: impl LogSink + 'static) -> Self {
        self.sink = Arc::new(sink);
        self
    }

    /// Replaces the stack source.
    #[must_use]
    pub fn with_stack_source(mut self, stack: impl StackSource + 'static) -> Self {
        self.stack = Arc::new(stack);
        self
    }

    /// Returns the configuration this interceptor wraps with.
    #[must_use]
    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    /// Wraps a dispatcher of the newer, environment-first protocol.
    #[must_use]
    pub fn wrap_template<R, E>(
        &self,
        original: BoxedDispatcher<TemplateCall, R, E>,
    ) -> BoxedDispatcher<TemplateCall, R, E>
    where
        R: 'static,
        E: 'static,
    {
        self.wrap_with(TemplateExtractor, original)
    }

    /// Wraps a dispatcher of the legacy, slots-first protocol.
    #[must_use]
    pub fn wrap_chain<R, E>(
        &self,
        original: BoxedDispatcher<ChainCall, R, E>,
    ) -> BoxedDispatcher<ChainCall, R, E>
    where
        R: 'static,
        E: 'static,
    {
        self.wrap_with(ChainExtractor, original)
    }

    /// Wraps a dispatcher with the shared interception core.
    ///
    /// On every call the replacement dispatcher:
    ///
    /// 1. snapshots the calling context — but only when filtering is
    ///    enabled, since capture is the expensive part;
    /// 2. gates on [`filter::should_log`];
    /// 3. if logging: extracts the [`Invocation`] through `extractor`,
    ///    resolves the hook method's defining location on the target,
    ///    renders the template, and writes the line to the sink at debug
    ///    severity — each step degrades to "no line" on failure;
    /// 4. delegates to `original` with the untouched argument pack and
    ///    returns its result, or propagates its error, unchanged.
    ///
    /// Wrapping composes: wrapping an already wrapped dispatcher adds one
    /// more observation layer and still executes the innermost dispatcher
    /// exactly once.
    #[must_use]
    pub fn wrap_with<X, R, E>(
        &self,
        extractor: X,
        original: BoxedDispatcher<X::Args, R, E>,
    ) -> BoxedDispatcher<X::Args, R, E>
    where
        X: ArgumentExtractor + 'static,
        X::Args: 'static,
        R: 'static,
        E: 'static,
    {
        let config = Arc::clone(&self.config);
        let sink = Arc::clone(&self.sink);
        let stack = Arc::clone(&self.stack);
        Box::new(move |args| {
            let snapshot = if config.filter_enabled() {
                stack.snapshot()
            } else {
                CallStack::empty()
            };
            if filter::should_log(&config, &snapshot) {
                observe(&config, sink.as_ref(), &extractor.extract(args));
            }
            original(args)
        })
    }
}

/// Emits the log line for one invocation, best effort.
///
/// A target that cannot resolve the method and a template that cannot
/// render both drop the line; neither may disturb delegation.
fn observe(config: &DispatchConfig, sink: &dyn LogSink, invocation: &Invocation<'_>) {
    let Some(location) = invocation.target.method_location(invocation.method) else {
        return;
    };
    if let Ok(line) = config.format().render(invocation.method, &location) {
        sink.debug(&line);
    }
}
