//! Call-stack snapshot primitives for hooklog (Layer 1).
//!
//! `hooklog_stack` provides a portable "current call stack as structured
//! frames" capability plus the small value types the interception layer
//! builds on.
//!
//! # Core Concepts
//!
//! - [`Frame`] - One call site as `(file, line, label)`
//! - [`CallStack`] - An ordered snapshot of frames
//! - [`SourceLocation`] - Where a method was defined, as opposed to where
//!   it is invoked
//! - [`StackSource`] - Capture abstraction, with [`RuntimeStack`] walking
//!   the live stack
//!
//! # Architecture
//!
//! This crate is Layer 1 of the hooklog architecture:
//!
//! - **Layer 1** (`hooklog_stack`): call-stack and location primitives (this crate)
//! - **Layer 2** (`hooklog_intercept`): dispatch interception and conditional logging

/// Call-stack snapshots and live capture.
pub mod capture;

/// Call-stack frame descriptors.
pub mod frame;

/// Source locations of method definitions.
pub mod location;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use crate::capture::{CallStack, RuntimeStack, StackSource};
    pub use crate::frame::Frame;
    pub use crate::location::SourceLocation;
}

// Re-export key types at crate root for convenience
pub use capture::{CallStack, RuntimeStack, StackSource};
pub use frame::Frame;
pub use location::SourceLocation;
