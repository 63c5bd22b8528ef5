//! Main application state management

use std::{
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc, Mutex, MutexGuard, Weak,
    },
    time::{Duration, Instant},
};
use tokio::sync::{broadcast, watch};
use tracing::{debug, info, warn};

use super::{ReportStatus, TimerEvent};
use crate::{
    config::ReportFailurePolicy,
    services::SessionReporter,
    tasks::{spawn_ticker, TickHandle},
    timer::{SessionRecord, SessionTimer, TickOutcome, TimerConfig, TimerView, Toggle},
};

/// Period of the repeating countdown tick
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// What the ticker task should do after delivering a tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickFlow {
    Continue,
    /// The tick was stale or the state is gone; the task must exit
    Stop,
    /// The session ran out; the task must hand the record off and exit
    Completed(SessionRecord),
}

/// The widget and the only handle that may drive it, locked together
#[derive(Debug)]
struct Controller {
    timer: SessionTimer,
    tick: Option<TickHandle>,
}

impl Controller {
    fn cancel_tick(&mut self) {
        if let Some(tick) = self.tick.take() {
            debug!("Cancelling tick generation {}", tick.generation());
            tick.cancel();
        }
    }
}

/// Main application state that owns the session timer and its tick
pub struct AppState {
    /// Immutable mode table
    pub timer_config: Arc<TimerConfig>,
    controller: Mutex<Controller>,
    next_generation: AtomicU64,
    tick_period: Duration,
    /// Report delivery and what to do when it fails
    reporter: Arc<dyn SessionReporter>,
    pub failure_policy: ReportFailurePolicy,
    last_report: Mutex<Option<ReportStatus>>,
    /// Server metadata
    pub start_time: Instant,
    /// Channel for widget events
    pub event_tx: broadcast::Sender<TimerEvent>,
    /// Channel for rendered views
    pub view_tx: watch::Sender<TimerView>,
    /// Keep the receiver alive to prevent channel closure
    pub _view_rx: watch::Receiver<TimerView>,
    this: Weak<AppState>,
}

impl AppState {
    /// Create the state with a widget loaded in the default mode
    pub fn new(
        timer_config: TimerConfig,
        reporter: Arc<dyn SessionReporter>,
        failure_policy: ReportFailurePolicy,
    ) -> Arc<Self> {
        Self::with_tick_period(timer_config, reporter, failure_policy, TICK_PERIOD)
    }

    pub fn with_tick_period(
        timer_config: TimerConfig,
        reporter: Arc<dyn SessionReporter>,
        failure_policy: ReportFailurePolicy,
        tick_period: Duration,
    ) -> Arc<Self> {
        let timer_config = Arc::new(timer_config);
        let timer = SessionTimer::new(Arc::clone(&timer_config));
        let (event_tx, _) = broadcast::channel(100);
        let (view_tx, view_rx) = watch::channel(timer.view());

        Arc::new_cyclic(|this| Self {
            timer_config,
            controller: Mutex::new(Controller { timer, tick: None }),
            next_generation: AtomicU64::new(0),
            tick_period,
            reporter,
            failure_policy,
            last_report: Mutex::new(None),
            start_time: Instant::now(),
            event_tx,
            view_tx,
            _view_rx: view_rx,
            this: this.clone(),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Controller>, String> {
        self.controller
            .lock()
            .map_err(|e| format!("Failed to lock timer controller: {}", e))
    }

    /// Render the widget and push the view while the controller is still locked
    ///
    /// Sending under the lock keeps the watch channel in the same order as the
    /// state changes themselves.
    fn render(&self, controller: &Controller) -> TimerView {
        let view = controller.timer.view();
        if let Err(e) = self.view_tx.send(view.clone()) {
            warn!("Failed to send view update: {}", e);
        }
        view
    }

    /// Send an event; having no subscribers is not an error
    pub fn broadcast(&self, event: TimerEvent) {
        if self.event_tx.receiver_count() == 0 {
            debug!("No event subscribers for {}", event.name());
            return;
        }
        if let Err(e) = self.event_tx.send(event) {
            warn!("Failed to send timer event: {}", e);
        }
    }

    /// Switch mode by id; returns `None` without touching anything if the id is unknown
    pub fn select_mode(&self, mode_id: &str) -> Result<Option<TimerView>, String> {
        let mut controller = self.lock()?;

        let Some(mode) = controller.timer.select_mode(mode_id) else {
            debug!("Ignoring unknown mode id: {}", mode_id);
            return Ok(None);
        };
        controller.cancel_tick();
        let view = self.render(&controller);
        drop(controller);

        info!("Mode set to {} ({} min)", mode, view.total_seconds / 60);
        self.broadcast(TimerEvent::ModeSelected { mode });
        Ok(Some(view))
    }

    /// Start or pause the countdown
    ///
    /// This is the only place a tick is scheduled. Whatever handle is held is
    /// cancelled first, so at most one tick is ever live.
    pub fn toggle(&self) -> Result<TimerView, String> {
        let mut controller = self.lock()?;

        controller.cancel_tick();
        let toggle = controller.timer.toggle();
        if toggle == Toggle::Started {
            let generation = self.next_generation.fetch_add(1, Ordering::SeqCst) + 1;
            controller.tick = Some(spawn_ticker(
                self.this.clone(),
                generation,
                self.tick_period,
            ));
        }

        let view = self.render(&controller);
        drop(controller);

        let event = match toggle {
            Toggle::Started => {
                info!("Timer started: {} {}", view.mode, view.display);
                TimerEvent::Started {
                    mode: view.mode,
                    remaining_seconds: view.remaining_seconds,
                }
            }
            Toggle::Paused => {
                info!("Timer paused: {} {}", view.mode, view.display);
                TimerEvent::Paused {
                    mode: view.mode,
                    remaining_seconds: view.remaining_seconds,
                }
            }
        };
        self.broadcast(event);
        Ok(view)
    }

    /// Stop the countdown and restore the current mode's full duration
    pub fn reset(&self) -> Result<TimerView, String> {
        let mut controller = self.lock()?;

        controller.cancel_tick();
        controller.timer.reset();
        let view = self.render(&controller);
        drop(controller);

        info!("Timer reset: {} {}", view.mode, view.display);
        self.broadcast(TimerEvent::Reset { mode: view.mode });
        Ok(view)
    }

    /// Deliver one tick from the ticker task holding `generation`
    pub fn on_tick(&self, generation: u64) -> TickFlow {
        let mut controller = match self.lock() {
            Ok(controller) => controller,
            Err(e) => {
                warn!("Dropping tick: {}", e);
                return TickFlow::Stop;
            }
        };

        let current = controller.tick.as_ref().map(TickHandle::generation);
        if current != Some(generation) {
            debug!("Stale tick generation {} (current {:?})", generation, current);
            return TickFlow::Stop;
        }

        match controller.timer.tick() {
            TickOutcome::Ignored => {
                controller.cancel_tick();
                TickFlow::Stop
            }
            TickOutcome::Continue => {
                self.render(&controller);
                TickFlow::Continue
            }
            TickOutcome::Completed(record) => {
                // The calling task exits on its own, so release the handle without aborting it
                controller.tick = None;
                self.render(&controller);
                drop(controller);

                info!("Session complete! {} minute {} session", record.duration, record.mode);
                self.broadcast(TimerEvent::SessionCompleted {
                    record: record.clone(),
                    at: chrono::Utc::now(),
                });
                TickFlow::Completed(record)
            }
        }
    }

    /// Rebuild the widget from the mode table, discarding local state
    pub fn resynchronize(&self) -> Result<TimerView, String> {
        let mut controller = self.lock()?;

        controller.cancel_tick();
        controller.timer = SessionTimer::new(Arc::clone(&self.timer_config));
        let view = self.render(&controller);
        drop(controller);

        info!("Timer resynchronized to {}", view.mode);
        self.broadcast(TimerEvent::Resynchronized { mode: view.mode });
        Ok(view)
    }

    pub fn reporter(&self) -> Arc<dyn SessionReporter> {
        Arc::clone(&self.reporter)
    }

    /// Get the current rendered view
    pub fn snapshot(&self) -> Result<TimerView, String> {
        self.lock().map(|controller| controller.timer.view())
    }

    /// Whether a tick handle is currently held
    pub fn has_scheduled_tick(&self) -> Result<bool, String> {
        self.lock().map(|controller| controller.tick.is_some())
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<TimerEvent> {
        self.event_tx.subscribe()
    }

    pub fn subscribe_views(&self) -> watch::Receiver<TimerView> {
        self.view_tx.subscribe()
    }

    pub fn set_last_report(&self, status: ReportStatus) -> Result<(), String> {
        let mut last_report = self.last_report.lock()
            .map_err(|e| format!("Failed to lock report status: {}", e))?;
        *last_report = Some(status);
        Ok(())
    }

    pub fn last_report(&self) -> Option<ReportStatus> {
        self.last_report.lock().ok().and_then(|status| status.clone())
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("timer_config", &self.timer_config)
            .field("controller", &self.controller)
            .field("failure_policy", &self.failure_policy)
            .finish_non_exhaustive()
    }
}
