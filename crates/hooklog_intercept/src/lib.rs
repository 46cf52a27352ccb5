//! Dispatch interception and conditional logging for hooklog (Layer 2).
//!
//! `hooklog_intercept` wraps the dispatchers a host framework builds for
//! its lifecycle hooks, so that every invocation emits one debug log line
//! naming the hook that ran and where it was defined. Interception is
//! purely observational: arguments, return values, and failures of the
//! wrapped dispatcher pass through untouched.
//!
//! # Core Concepts
//!
//! - [`DispatchConfig`] - Immutable configuration, read once at startup
//! - [`Interceptor`] - Wraps dispatchers with the observe-then-delegate core
//! - [`protocol`] - The two builder protocols and the extraction strategy
//! - [`filter`] - Optional call-site gating against source-path prefixes
//! - [`sink`] - Where the lines go (stdout default, `tracing`, in-memory)
//!
//! # Architecture
//!
//! This crate is Layer 2 of the hooklog architecture:
//!
//! - **Layer 1** (`hooklog_stack`): call-stack and location primitives
//! - **Layer 2** (`hooklog_intercept`): dispatch interception (this crate)
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use hooklog_intercept::config::DispatchConfig;
//! use hooklog_intercept::interceptor::{BoxedDispatcher, Interceptor};
//! use hooklog_intercept::protocol::{CallEnv, MethodTable, TemplateCall};
//! use hooklog_intercept::sink::MemorySink;
//! use hooklog_stack::SourceLocation;
//!
//! let sink = Arc::new(MemorySink::new());
//! let interceptor = Interceptor::new(DispatchConfig::from_env("/srv/host"))
//!     .with_sink(Arc::clone(&sink));
//!
//! let original: BoxedDispatcher<TemplateCall, (), String> = Box::new(|_call| Ok(()));
//! let wrapped = interceptor.wrap_template(original);
//!
//! let call = TemplateCall {
//!     env: CallEnv {
//!         target: Arc::new(MethodTable::new().define(
//!             "before_save",
//!             SourceLocation::new("/srv/host/app/models/user.rs", 10),
//!         )),
//!         method: "before_save".into(),
//!     },
//!     values: Vec::new(),
//!     continuation: None,
//! };
//! wrapped(&call).unwrap();
//! assert_eq!(sink.messages(), vec!["Callback before_save".to_string()]);
//! ```

/// Immutable dispatch configuration.
pub mod config;

/// Call-site filter evaluation.
pub mod filter;

/// The invocation interceptor.
pub mod interceptor;

/// Dispatch protocol types.
pub mod protocol;

/// Logging sinks.
pub mod sink;

/// Log line templates.
pub mod template;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use crate::config::DispatchConfig;
    pub use crate::interceptor::{BoxedDispatcher, Interceptor};
    pub use crate::protocol::{
        ArgumentExtractor, CallEnv, ChainCall, ChainExtractor, Continuation, HookTarget,
        Invocation, MethodTable, TemplateCall, TemplateExtractor, Value,
    };
    pub use crate::sink::{LogSink, MemorySink, StdoutSink, TracingSink};
    pub use crate::template::{LogTemplate, TemplateError};
}

// Re-export key types at crate root for convenience
pub use config::DispatchConfig;
pub use interceptor::{BoxedDispatcher, Interceptor};
pub use sink::LogSink;
pub use template::{LogTemplate, TemplateError};
