//! Timer presets and the immutable mode table

use std::fmt;
use serde::{Deserialize, Serialize};

/// Radius of the circular progress ring, in view units
pub const RING_RADIUS: f64 = 120.0;

/// One of the three timer presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    #[serde(rename = "pomodoro")]
    Pomodoro,
    #[serde(rename = "short")]
    Short,
    #[serde(rename = "long")]
    Long,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Pomodoro, Mode::Short, Mode::Long];

    /// Canonical id, as sent to the dashboard
    pub fn id(&self) -> &'static str {
        match self {
            Mode::Pomodoro => "pomodoro",
            Mode::Short => "short",
            Mode::Long => "long",
        }
    }

    /// Resolve a mode id, accepting the descriptive aliases as well
    pub fn from_id(id: &str) -> Option<Self> {
        match id.trim().to_ascii_lowercase().as_str() {
            "pomodoro" | "focus" => Some(Mode::Pomodoro),
            "short" | "short-break" => Some(Mode::Short),
            "long" | "long-break" => Some(Mode::Long),
            _ => None,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Duration and display label for a single mode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeSpec {
    pub minutes: u32,
    pub label: String,
}

impl ModeSpec {
    fn new(minutes: u32, label: &str) -> Self {
        Self {
            minutes,
            label: label.to_string(),
        }
    }

    pub fn total_seconds(&self) -> u32 {
        self.minutes * 60
    }
}

/// Fixed mapping from mode to preset, never mutated after construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerConfig {
    pomodoro: ModeSpec,
    short: ModeSpec,
    long: ModeSpec,
    default_mode: Mode,
}

impl TimerConfig {
    pub fn spec(&self, mode: Mode) -> &ModeSpec {
        match mode {
            Mode::Pomodoro => &self.pomodoro,
            Mode::Short => &self.short,
            Mode::Long => &self.long,
        }
    }

    /// Mode a freshly loaded widget starts in
    pub fn default_mode(&self) -> Mode {
        self.default_mode
    }

    /// Iterate the presets in display order
    pub fn iter(&self) -> impl Iterator<Item = (Mode, &ModeSpec)> {
        Mode::ALL.into_iter().map(move |mode| (mode, self.spec(mode)))
    }
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            pomodoro: ModeSpec::new(25, "TIME TO FOCUS"),
            short: ModeSpec::new(5, "SHORT BREAK"),
            long: ModeSpec::new(50, "DEEP FOCUS"),
            default_mode: Mode::Pomodoro,
        }
    }
}
