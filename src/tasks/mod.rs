//! Background tasks module
//!
//! This module contains the countdown ticker and the completion report that
//! run alongside the HTTP server.

pub mod report;
pub mod ticker;

// Re-export main functions
pub use report::report_and_resynchronize;
pub use ticker::{spawn_ticker, TickHandle};
