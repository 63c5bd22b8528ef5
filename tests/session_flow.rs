//! Full countdown runs on paused tokio time

mod common;

use std::{sync::Arc, time::Duration};

use common::{drain, settle, RecordingReporter};
use focus_timer::{
    config::ReportFailurePolicy,
    state::{AppState, ReportOutcome, TimerEvent},
    timer::{ControlLabel, Mode, SessionRecord, TimerConfig},
};
use tokio::time::sleep;

fn state_with(reporter: &RecordingReporter, policy: ReportFailurePolicy) -> Arc<AppState> {
    AppState::new(TimerConfig::default(), Arc::new(reporter.clone()), policy)
}

fn secs(s: u64) -> Duration {
    Duration::from_secs(s)
}

fn half_second() -> Duration {
    Duration::from_millis(500)
}

#[tokio::test(start_paused = true)]
async fn default_session_reports_once_and_resynchronizes() {
    let reporter = RecordingReporter::default();
    let state = state_with(&reporter, ReportFailurePolicy::Ignore);
    let mut events = state.subscribe_events();

    state.toggle().unwrap();
    sleep(secs(1500) + half_second()).await;

    let view = state.snapshot().unwrap();
    assert_eq!(view.display, "00:00");
    assert!(view.running);
    assert!(reporter.calls().is_empty());

    // The tick after reaching zero completes the session
    sleep(secs(1)).await;
    settle().await;

    assert_eq!(
        reporter.calls(),
        vec![SessionRecord { duration: 25, mode: Mode::Pomodoro }]
    );

    let view = state.snapshot().unwrap();
    assert_eq!(view.display, "25:00");
    assert!(!view.running);
    assert_eq!(view.control, ControlLabel::Start);
    assert!(!state.has_scheduled_tick().unwrap());

    let names: Vec<_> = drain(&mut events).iter().map(TimerEvent::name).collect();
    assert_eq!(names, vec!["started", "session_completed", "reported", "resynchronized"]);

    let last = state.last_report().unwrap();
    assert_eq!(last.outcome, ReportOutcome::Delivered);
    assert_eq!(last.xp_gained, Some(250));

    sleep(secs(30)).await;
    settle().await;
    assert_eq!(reporter.calls().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn rapid_double_toggle_schedules_at_most_one_tick() {
    let reporter = RecordingReporter::default();
    let state = state_with(&reporter, ReportFailurePolicy::Ignore);

    state.toggle().unwrap();
    state.toggle().unwrap();
    assert!(!state.has_scheduled_tick().unwrap());

    sleep(secs(5)).await;
    assert_eq!(state.snapshot().unwrap().remaining_seconds, 1500);

    state.toggle().unwrap();
    state.toggle().unwrap();
    state.toggle().unwrap();
    assert!(state.has_scheduled_tick().unwrap());

    sleep(secs(3) + half_second()).await;
    // Two live tickers would have taken six seconds off
    assert_eq!(state.snapshot().unwrap().remaining_seconds, 1497);
}

#[tokio::test(start_paused = true)]
async fn pause_keeps_remaining_time() {
    let reporter = RecordingReporter::default();
    let state = state_with(&reporter, ReportFailurePolicy::Ignore);

    state.toggle().unwrap();
    sleep(secs(10) + half_second()).await;
    let paused = state.toggle().unwrap();
    assert_eq!(paused.display, "24:50");
    assert_eq!(paused.control, ControlLabel::Resume);
    assert_eq!(state.subscribe_views().borrow().display, "24:50");

    sleep(secs(60)).await;
    assert_eq!(state.snapshot().unwrap().display, "24:50");
}

#[tokio::test(start_paused = true)]
async fn mode_switch_while_running_cancels_old_tick() {
    let reporter = RecordingReporter::default();
    let state = state_with(&reporter, ReportFailurePolicy::Ignore);

    state.toggle().unwrap();
    sleep(secs(10) + half_second()).await;
    assert_eq!(state.snapshot().unwrap().remaining_seconds, 1490);

    let view = state.select_mode("short").unwrap().unwrap();
    assert_eq!(view.remaining_seconds, 300);
    assert!(!view.running);
    assert!(!state.has_scheduled_tick().unwrap());

    sleep(secs(20)).await;
    let view = state.snapshot().unwrap();
    assert_eq!(view.mode, Mode::Short);
    assert_eq!(view.remaining_seconds, 300);
}

#[tokio::test(start_paused = true)]
async fn reset_after_ticks_restores_full_duration() {
    let reporter = RecordingReporter::default();
    let state = state_with(&reporter, ReportFailurePolicy::Ignore);

    state.select_mode("long").unwrap();
    state.toggle().unwrap();
    sleep(secs(42) + half_second()).await;

    let view = state.reset().unwrap();
    assert_eq!(view.remaining_seconds, 3000);
    assert_eq!(view.total_seconds, 3000);
    assert!(!view.running);

    sleep(secs(5)).await;
    assert_eq!(state.snapshot().unwrap().remaining_seconds, 3000);
}

#[tokio::test(start_paused = true)]
async fn unknown_mode_leaves_running_timer_alone() {
    let reporter = RecordingReporter::default();
    let state = state_with(&reporter, ReportFailurePolicy::Ignore);

    state.toggle().unwrap();
    assert!(state.select_mode("siesta").unwrap().is_none());
    assert!(state.has_scheduled_tick().unwrap());

    sleep(secs(2) + half_second()).await;
    assert_eq!(state.snapshot().unwrap().remaining_seconds, 1498);
}

#[tokio::test(start_paused = true)]
async fn ignored_report_failure_keeps_completed_state_quietly() {
    let reporter = RecordingReporter::failing(500);
    let state = state_with(&reporter, ReportFailurePolicy::Ignore);
    let mut events = state.subscribe_events();

    state.select_mode("short").unwrap();
    state.toggle().unwrap();
    sleep(secs(301) + half_second()).await;
    settle().await;

    assert_eq!(
        reporter.calls(),
        vec![SessionRecord { duration: 5, mode: Mode::Short }]
    );

    let view = state.snapshot().unwrap();
    assert_eq!(view.display, "00:00");
    assert!(!view.running);
    assert!(state.last_report().is_none());

    let names: Vec<_> = drain(&mut events).iter().map(TimerEvent::name).collect();
    assert_eq!(names, vec!["mode_selected", "started", "session_completed"]);
}

#[tokio::test(start_paused = true)]
async fn surfaced_report_failure_is_published() {
    let reporter = RecordingReporter::failing(401);
    let state = state_with(&reporter, ReportFailurePolicy::Surface);
    let mut events = state.subscribe_events();

    state.select_mode("short").unwrap();
    state.toggle().unwrap();
    sleep(secs(301) + half_second()).await;
    settle().await;

    let failed = drain(&mut events)
        .into_iter()
        .find(|event| matches!(event, TimerEvent::ReportFailed { .. }));
    match failed {
        Some(TimerEvent::ReportFailed { record, error }) => {
            assert_eq!(record.mode, Mode::Short);
            assert!(error.contains("401"));
        }
        other => panic!("expected report_failed, got {:?}", other),
    }

    let last = state.last_report().unwrap();
    assert_eq!(last.outcome, ReportOutcome::Failed);
    assert_eq!(state.snapshot().unwrap().display, "00:00");
}

#[tokio::test(start_paused = true)]
async fn restart_after_failed_report_runs_a_fresh_session() {
    let reporter = RecordingReporter::failing(503);
    let state = state_with(&reporter, ReportFailurePolicy::Ignore);

    state.select_mode("short").unwrap();
    state.toggle().unwrap();
    sleep(secs(301) + half_second()).await;
    settle().await;

    let view = state.toggle().unwrap();
    assert_eq!(view.remaining_seconds, 300);
    assert!(view.running);

    sleep(secs(301) + half_second()).await;
    settle().await;
    assert_eq!(reporter.calls().len(), 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn watched_view_matches_state_after_concurrent_ticks_and_resets() {
    let reporter = RecordingReporter::default();
    let state = AppState::with_tick_period(
        TimerConfig::default(),
        Arc::new(reporter.clone()),
        ReportFailurePolicy::Ignore,
        Duration::from_micros(50),
    );
    let views = state.subscribe_views();

    let workers: Vec<_> = (0..4)
        .map(|worker| {
            let state = Arc::clone(&state);
            tokio::spawn(async move {
                for round in 0..200 {
                    state.toggle().unwrap();
                    sleep(Duration::from_micros(300)).await;
                    if (round + worker) % 3 == 0 {
                        state.select_mode("short").unwrap();
                    } else {
                        state.reset().unwrap();
                    }
                }
            })
        })
        .collect();
    for worker in workers {
        worker.await.unwrap();
    }

    // Every worker ends on a reset or mode switch, so no tick is live any more
    sleep(Duration::from_millis(20)).await;
    let view = state.snapshot().unwrap();
    assert!(!view.running);
    assert!(!state.has_scheduled_tick().unwrap());
    assert_eq!(*views.borrow(), view);
    assert!(reporter.calls().is_empty());
}
