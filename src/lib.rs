//! Focus Timer - A state-managed study session timer
//!
//! This library provides the pomodoro-style session timer used by the study
//! dashboard: the countdown state machine, its rendered view, a local control
//! API, and the report that records completed sessions with the dashboard.

pub mod config;
pub mod filter;
pub mod timer;
pub mod state;
pub mod api;
pub mod services;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::{Config, ReportFailurePolicy};
pub use state::AppState;
pub use api::create_router;
pub use utils::signals::shutdown_signal;
