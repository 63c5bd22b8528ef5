//! Timer events broadcast to listeners and the last report outcome

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::{Mode, SessionRecord};

/// Notification emitted after every state change of the widget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TimerEvent {
    ModeSelected { mode: Mode },
    Started { mode: Mode, remaining_seconds: u32 },
    Paused { mode: Mode, remaining_seconds: u32 },
    Reset { mode: Mode },
    SessionCompleted { record: SessionRecord, at: DateTime<Utc> },
    Reported { record: SessionRecord, xp_gained: Option<u32> },
    ReportFailed { record: SessionRecord, error: String },
    Resynchronized { mode: Mode },
}

impl TimerEvent {
    /// Event name as used on the SSE stream
    pub fn name(&self) -> &'static str {
        match self {
            TimerEvent::ModeSelected { .. } => "mode_selected",
            TimerEvent::Started { .. } => "started",
            TimerEvent::Paused { .. } => "paused",
            TimerEvent::Reset { .. } => "reset",
            TimerEvent::SessionCompleted { .. } => "session_completed",
            TimerEvent::Reported { .. } => "reported",
            TimerEvent::ReportFailed { .. } => "report_failed",
            TimerEvent::Resynchronized { .. } => "resynchronized",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportOutcome {
    Delivered,
    Failed,
}

/// Outcome of the most recent session report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportStatus {
    pub outcome: ReportOutcome,
    pub record: SessionRecord,
    pub xp_gained: Option<u32>,
    pub error: Option<String>,
    pub at: DateTime<Utc>,
}

impl ReportStatus {
    pub fn delivered(record: SessionRecord, xp_gained: Option<u32>) -> Self {
        Self {
            outcome: ReportOutcome::Delivered,
            record,
            xp_gained,
            error: None,
            at: Utc::now(),
        }
    }

    pub fn failed(record: SessionRecord, error: String) -> Self {
        Self {
            outcome: ReportOutcome::Failed,
            record,
            xp_gained: None,
            error: Some(error),
            at: Utc::now(),
        }
    }
}
