//! Session timer widget
//!
//! This module contains the mode table, the countdown state machine and the
//! view it renders to. Nothing in here schedules ticks or performs I/O.

pub mod modes;
pub mod timer_state;
pub mod view;
pub mod widget;

// Re-export main types
pub use modes::{Mode, ModeSpec, TimerConfig, RING_RADIUS};
pub use timer_state::TimerState;
pub use view::{ControlLabel, TimerView};
pub use widget::{SessionRecord, SessionTimer, TickOutcome, Toggle};
