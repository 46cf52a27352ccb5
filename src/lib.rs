//! Diagnostic logging for lifecycle hook dispatch.
//!

pub use hooklog_internal::*;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use hooklog_internal::prelude::*;
}
