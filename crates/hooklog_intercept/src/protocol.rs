//! Dispatch protocol types.
//!
//! The host framework's chain builder produces dispatchers and defines the
//! argument pack they are called with. That builder has historically
//! shipped two incompatible shapes: a newer one where the receiver and the
//! hook method travel inside a call environment ([`TemplateCall`]), and a
//! legacy one where they travel as leading positional slots
//! ([`ChainCall`]). This module models both shapes, the reflective surface
//! of the receiver ([`HookTarget`]), and the [`ArgumentExtractor`] strategy
//! that pulls a uniform [`Invocation`] view out of either.
//!
//! Interception never inspects the positional [`Value`]s or the trailing
//! [`Continuation`]; they are opaque and pass through unmodified.

use core::any::Any;
use std::sync::Arc;

use hashbrown::HashMap;
use hooklog_stack::SourceLocation;

/// Opaque positional argument conveyed through dispatch, never inspected.
pub type Value = Arc<dyn Any + Send + Sync>;

/// Opaque trailing continuation, passed through unmodified.
pub type Continuation = Arc<dyn Fn(&[Value]) + Send + Sync>;

// ─────────────────────────────────────────────────────────────────────────────
// HookTarget
// ─────────────────────────────────────────────────────────────────────────────

/// The receiver object a hook executes against.
///
/// Interception only needs the receiver's reflective surface: given a hook
/// method's identifier, where was that method defined? A target that
/// cannot answer — the method is dynamically undefined at call time —
/// returns `None`, and the log line for that invocation is skipped.
pub trait HookTarget: Send + Sync {
    /// Resolves the defining source location of `method`, if known.
    fn method_location(&self, method: &str) -> Option<SourceLocation>;
}

/// An explicit method table: hook method identifier to defining location.
///
/// Hosts mirror their callback methods into a table to give interception
/// a reflective surface over the receiver; the table implements
/// [`HookTarget`] directly.
///
/// # Example
///
/// ```
/// use hooklog_intercept::protocol::{HookTarget, MethodTable};
/// use hooklog_stack::SourceLocation;
///
/// let table = MethodTable::new()
///     .define("before_save", SourceLocation::new("app/models/user.rb", 4));
///
/// assert!(table.method_location("before_save").is_some());
/// assert!(table.method_location("after_commit").is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MethodTable {
    /// Method identifier to defining location.
    methods: HashMap<String, SourceLocation>,
}

impl MethodTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records where `method` is defined.
    #[must_use]
    pub fn define(mut self, method: impl Into<String>, location: SourceLocation) -> Self {
        self.methods.insert(method.into(), location);
        self
    }

    /// Returns the number of methods in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.methods.len()
    }

    /// Returns `true` if the table holds no methods.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}

impl HookTarget for MethodTable {
    fn method_location(&self, method: &str) -> Option<SourceLocation> {
        self.methods.get(method).cloned()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Argument packs
// ─────────────────────────────────────────────────────────────────────────────

/// Call environment of the newer builder protocol: the receiver and the
/// hook method travel together, ahead of the positional values.
#[derive(Clone)]
pub struct CallEnv {
    /// The receiver the hook executes against.
    pub target: Arc<dyn HookTarget>,
    /// Identifier of the hook method being invoked.
    pub method: String,
}

/// Argument pack of the newer builder protocol.
#[derive(Clone)]
pub struct TemplateCall {
    /// The call environment carrying receiver and method.
    pub env: CallEnv,
    /// Remaining positional values, passed through unmodified.
    pub values: Vec<Value>,
    /// Optional trailing continuation, passed through unmodified.
    pub continuation: Option<Continuation>,
}

/// Argument pack of the legacy builder protocol: the receiver and the hook
/// method travel as leading positional slots.
#[derive(Clone)]
pub struct ChainCall {
    /// The receiver the hook executes against.
    pub target: Arc<dyn HookTarget>,
    /// Identifier of the hook method being invoked.
    pub method: String,
    /// Remaining positional values, passed through unmodified.
    pub values: Vec<Value>,
    /// Optional trailing continuation, passed through unmodified.
    pub continuation: Option<Continuation>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Invocation + extraction strategies
// ─────────────────────────────────────────────────────────────────────────────

/// Borrowed view of one intercepted invocation.
///
/// Constructed at call entry from the protocol's argument pack, consumed
/// synchronously while the call is on the stack, never stored.
pub struct Invocation<'a> {
    /// The receiver the hook executes against.
    pub target: &'a dyn HookTarget,
    /// Identifier of the hook method being invoked.
    pub method: &'a str,
    /// Positional values conveyed through dispatch.
    pub values: &'a [Value],
}

/// Strategy for pulling an [`Invocation`] out of a protocol-specific
/// argument pack.
///
/// The interception core is identical across builder protocols; only this
/// extraction step differs. The host selects the implementation matching
/// its framework shape — [`TemplateExtractor`] or [`ChainExtractor`] — at
/// setup time.
pub trait ArgumentExtractor: Send + Sync {
    /// The argument pack this strategy understands.
    type Args;

    /// Extracts the invocation view from `args`.
    fn extract<'a>(&self, args: &'a Self::Args) -> Invocation<'a>;
}

/// Extractor for the newer, environment-first protocol.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateExtractor;

impl ArgumentExtractor for TemplateExtractor {
    type Args = TemplateCall;

    fn extract<'a>(&self, args: &'a TemplateCall) -> Invocation<'a> {
        Invocation {
            target: args.env.target.as_ref(),
            method: &args.env.method,
            values: &args.values,
        }
    }
}

/// Extractor for the legacy, slots-first protocol.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChainExtractor;

impl ArgumentExtractor for ChainExtractor {
    type Args = ChainCall;

    fn extract<'a>(&self, args: &'a ChainCall) -> Invocation<'a> {
        Invocation {
            target: args.target.as_ref(),
            method: &args.method,
            values: &args.values,
        }
    }
}
