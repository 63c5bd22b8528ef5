//! Repeating countdown tick

use std::{sync::Weak, time::Duration};
use tokio::{
    task::JoinHandle,
    time::{interval_at, Instant, MissedTickBehavior},
};
use tracing::debug;

use super::report_and_resynchronize;
use crate::state::{AppState, TickFlow};

/// Owned handle to a scheduled ticker task
#[derive(Debug)]
pub struct TickHandle {
    generation: u64,
    task: JoinHandle<()>,
}

impl TickHandle {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Abort the ticker task
    pub fn cancel(self) {
        self.task.abort();
    }
}

/// Spawn a task that delivers one tick per `period`, starting one period from now
///
/// The task holds only a weak reference, so dropping the state ends it too.
pub fn spawn_ticker(state: Weak<AppState>, generation: u64, period: Duration) -> TickHandle {
    let task = tokio::spawn(async move {
        debug!("Ticker generation {} started", generation);

        let mut interval = interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            interval.tick().await;

            let Some(state) = state.upgrade() else {
                debug!("Timer state dropped, ticker generation {} exiting", generation);
                break;
            };

            match state.on_tick(generation) {
                TickFlow::Continue => {}
                TickFlow::Stop => break,
                TickFlow::Completed(record) => {
                    tokio::spawn(report_and_resynchronize(state, record));
                    break;
                }
            }
        }

        debug!("Ticker generation {} finished", generation);
    });

    TickHandle { generation, task }
}
