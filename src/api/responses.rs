//! API response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    config::ReportFailurePolicy,
    state::ReportStatus,
    timer::{Mode, TimerConfig, TimerView},
};

/// API response structure for timer control endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub timer: TimerView,
}

impl ApiResponse {
    /// Create a new API response
    pub fn new(status: String, message: String, timer: TimerView) -> Self {
        Self {
            status,
            message,
            timestamp: Utc::now(),
            timer,
        }
    }

    pub fn running(message: String, timer: TimerView) -> Self {
        Self::new("running".to_string(), message, timer)
    }

    pub fn idle(message: String, timer: TimerView) -> Self {
        Self::new("idle".to_string(), message, timer)
    }

    /// The request was understood but changed nothing
    pub fn ignored(message: String, timer: TimerView) -> Self {
        Self::new("ignored".to_string(), message, timer)
    }

    /// Pick `running` or `idle` from the view itself
    pub fn from_view(message: String, timer: TimerView) -> Self {
        if timer.running {
            Self::running(message, timer)
        } else {
            Self::idle(message, timer)
        }
    }
}

/// Full timer status, including the last report outcome
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerStatusResponse {
    pub timer: TimerView,
    pub tick_scheduled: bool,
    pub failure_policy: ReportFailurePolicy,
    pub last_report: Option<ReportStatus>,
    pub uptime: String,
}

/// One entry of the mode table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModeEntry {
    pub id: Mode,
    pub minutes: u32,
    pub label: String,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModesResponse {
    pub default_mode: Mode,
    pub modes: Vec<ModeEntry>,
}

impl ModesResponse {
    pub fn new(config: &TimerConfig, active: Mode) -> Self {
        Self {
            default_mode: config.default_mode(),
            modes: config
                .iter()
                .map(|(mode, spec)| ModeEntry {
                    id: mode,
                    minutes: spec.minutes,
                    label: spec.label.clone(),
                    active: mode == active,
                })
                .collect(),
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
    pub uptime: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok(uptime: String) -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime,
        }
    }
}
