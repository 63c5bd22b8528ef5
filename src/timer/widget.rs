//! Session timer state machine
//!
//! `SessionTimer` knows nothing about scheduling or the network. The owner is
//! expected to hold the tick handle and act on the returned outcomes.

use std::sync::Arc;
use serde::{Deserialize, Serialize};

use super::{ControlLabel, Mode, TimerConfig, TimerState, TimerView};

/// Payload reported to the dashboard when a session runs to zero
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Session length in whole minutes
    pub duration: u32,
    pub mode: Mode,
}

/// Result of a start/pause toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Started,
    Paused,
}

/// Result of a single tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// Timer is not running, nothing changed
    Ignored,
    /// One second was taken off the clock
    Continue,
    /// The countdown had already reached zero; the session is over
    Completed(SessionRecord),
}

#[derive(Debug, Clone)]
pub struct SessionTimer {
    config: Arc<TimerConfig>,
    state: TimerState,
    control: ControlLabel,
}

impl SessionTimer {
    /// Create a widget in the configured default mode
    pub fn new(config: Arc<TimerConfig>) -> Self {
        let state = TimerState::for_mode(&config, config.default_mode());
        Self {
            config,
            state,
            control: ControlLabel::Start,
        }
    }

    pub fn state(&self) -> &TimerState {
        &self.state
    }

    pub fn is_running(&self) -> bool {
        self.state.running
    }

    /// Switch to a mode by id; unknown ids leave the widget untouched
    pub fn select_mode(&mut self, mode_id: &str) -> Option<Mode> {
        let mode = Mode::from_id(mode_id)?;
        self.set_mode(mode);
        Some(mode)
    }

    fn set_mode(&mut self, mode: Mode) {
        self.state = TimerState::for_mode(&self.config, mode);
        self.control = ControlLabel::Start;
    }

    pub fn toggle(&mut self) -> Toggle {
        if self.state.running {
            self.state.running = false;
            self.control = ControlLabel::Resume;
            Toggle::Paused
        } else {
            if self.state.is_exhausted() {
                self.state.rearm();
            }
            self.state.running = true;
            self.control = ControlLabel::Pause;
            Toggle::Started
        }
    }

    pub fn reset(&mut self) {
        self.state.running = false;
        self.state.rearm();
        self.control = ControlLabel::Start;
    }

    pub fn tick(&mut self) -> TickOutcome {
        if !self.state.running {
            return TickOutcome::Ignored;
        }

        if self.state.decrement() {
            return TickOutcome::Continue;
        }

        self.state.running = false;
        self.control = ControlLabel::Start;
        TickOutcome::Completed(SessionRecord {
            duration: self.config.spec(self.state.mode).minutes,
            mode: self.state.mode,
        })
    }

    pub fn view(&self) -> TimerView {
        TimerView::render(&self.state, &self.config, self.control)
    }
}
