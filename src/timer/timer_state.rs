//! Timer state structure and its invariant

use serde::{Deserialize, Serialize};

use super::{Mode, TimerConfig};

/// Countdown state for the session timer
///
/// `remaining_seconds` never exceeds `total_seconds`. `running` mirrors whether
/// a tick handle is held by the owning controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    pub mode: Mode,
    pub total_seconds: u32,
    pub remaining_seconds: u32,
    pub running: bool,
}

impl TimerState {
    /// Create an idle, full-length state for the given mode
    pub fn for_mode(config: &TimerConfig, mode: Mode) -> Self {
        let total_seconds = config.spec(mode).total_seconds();
        Self {
            mode,
            total_seconds,
            remaining_seconds: total_seconds,
            running: false,
        }
    }

    /// Whether the countdown has reached zero
    pub fn is_exhausted(&self) -> bool {
        self.remaining_seconds == 0
    }

    /// Decrement by one second, returning false if already at zero
    pub fn decrement(&mut self) -> bool {
        match self.remaining_seconds.checked_sub(1) {
            Some(remaining) => {
                self.remaining_seconds = remaining;
                true
            }
            None => false,
        }
    }

    /// Restore the full duration without touching the mode
    pub fn rearm(&mut self) {
        self.remaining_seconds = self.total_seconds;
    }
}
