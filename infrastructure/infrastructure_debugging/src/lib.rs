//! Infrastructure Layer: Debugging
//!
//! Provides the diagnostic sink used wherever a failure must not propagate.
//! Depends on Entities layer.
//!
//! This crate provides:
//! - Error reporting for failures raised during teardown (closing a file
//!   from `Drop`), rendered as `message: OS error text` on stderr
//! - A per-thread report hook so callers and tests can observe reports
//! - Opt-in trace output for file operations
//! - Process-wide switches for both kinds of output

pub mod error_report;

pub use error_report::{ErrorReporter, ReportHook};
