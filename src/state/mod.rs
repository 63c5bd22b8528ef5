//! State management module
//!
//! This module owns the single timer widget for the process, its tick handle,
//! and the channels that carry rendered views and events to clients.

pub mod app_state;
pub mod events;

// Re-export main types
pub use app_state::{AppState, TickFlow};
pub use events::{ReportOutcome, ReportStatus, TimerEvent};
