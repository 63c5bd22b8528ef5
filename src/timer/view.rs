//! Render output of the timer widget
//!
//! Everything a display needs is computed here from [`TimerState`], so the state
//! machine itself never touches an output surface.

use std::f64::consts::PI;
use serde::{Deserialize, Serialize};

use super::{Mode, TimerConfig, TimerState, RING_RADIUS};

/// Label shown on the start/pause control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControlLabel {
    #[serde(rename = "Start Focus")]
    Start,
    #[serde(rename = "Pause")]
    Pause,
    #[serde(rename = "Resume")]
    Resume,
}

/// Snapshot of the rendered widget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerView {
    /// Active mode, drives the selected-button indicator
    pub mode: Mode,
    pub label: String,
    /// `MM:SS`
    pub display: String,
    pub remaining_seconds: u32,
    pub total_seconds: u32,
    pub running: bool,
    pub control: ControlLabel,
    pub circumference: f64,
    pub stroke_offset: f64,
}

impl TimerView {
    pub fn render(state: &TimerState, config: &TimerConfig, control: ControlLabel) -> Self {
        let circumference = ring_circumference();
        Self {
            mode: state.mode,
            label: config.spec(state.mode).label.clone(),
            display: format_clock(state.remaining_seconds),
            remaining_seconds: state.remaining_seconds,
            total_seconds: state.total_seconds,
            running: state.running,
            control,
            circumference,
            stroke_offset: stroke_offset(state.remaining_seconds, state.total_seconds),
        }
    }
}

pub fn ring_circumference() -> f64 {
    2.0 * PI * RING_RADIUS
}

/// Dash offset of the progress ring: zero when full, the whole circumference when empty
pub fn stroke_offset(remaining_seconds: u32, total_seconds: u32) -> f64 {
    let circumference = ring_circumference();
    if total_seconds == 0 {
        return circumference;
    }
    circumference * (1.0 - f64::from(remaining_seconds) / f64::from(total_seconds))
}

/// Format seconds as zero-padded `MM:SS`; minutes are not wrapped into hours
pub fn format_clock(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
