//! External service module
//!
//! This module contains the outbound reporter that delivers completed sessions
//! to the dashboard backend.

pub mod reporter;

// Re-export main types
pub use reporter::{HttpReporter, ReportAck, ReportError, SessionReporter};
