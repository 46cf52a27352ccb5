//! # Hooklog Internal Library
//!
//! Re-exports the core hooklog crates for convenience.

/// Layer 1: call-stack snapshot primitives.
pub use hooklog_stack;

/// Layer 2: dispatch interception and conditional logging.
pub use hooklog_intercept;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use hooklog_intercept::prelude::*;
    pub use hooklog_stack::prelude::*;
}
