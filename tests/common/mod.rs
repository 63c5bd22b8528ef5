#![allow(dead_code)]

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use focus_timer::{
    services::{ReportAck, ReportError, SessionReporter},
    state::TimerEvent,
    timer::SessionRecord,
};
use futures::future::{BoxFuture, FutureExt};
use tokio::sync::broadcast;

/// In-memory reporter that records every call
#[derive(Clone, Default)]
pub struct RecordingReporter {
    calls: Arc<Mutex<Vec<SessionRecord>>>,
    fail_with: Option<u16>,
}

impl RecordingReporter {
    pub fn failing(status: u16) -> Self {
        Self {
            calls: Arc::default(),
            fail_with: Some(status),
        }
    }

    pub fn calls(&self) -> Vec<SessionRecord> {
        self.calls.lock().unwrap().clone()
    }
}

impl SessionReporter for RecordingReporter {
    fn report(&self, record: SessionRecord) -> BoxFuture<'static, Result<ReportAck, ReportError>> {
        self.calls.lock().unwrap().push(record);
        let fail_with = self.fail_with;
        async move {
            match fail_with {
                Some(status) => Err(ReportError::Status { status }),
                None => Ok(ReportAck {
                    status: Some("success".to_string()),
                    xp_gained: Some(250),
                }),
            }
        }
        .boxed()
    }
}

/// Let spawned tasks run to their next await point
pub async fn settle() {
    for _ in 0..16 {
        tokio::task::yield_now().await;
    }
}

/// Drain every event currently queued on the receiver
pub fn drain(rx: &mut broadcast::Receiver<TimerEvent>) -> Vec<TimerEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

/// Wait for the first event matching `pred`, giving up after `limit`
pub async fn wait_for<F>(
    rx: &mut broadcast::Receiver<TimerEvent>,
    limit: Duration,
    pred: F,
) -> Option<TimerEvent>
where
    F: Fn(&TimerEvent) -> bool,
{
    tokio::time::timeout(limit, async {
        loop {
            match rx.recv().await {
                Ok(event) if pred(&event) => return Some(event),
                Ok(_) => continue,
                Err(broadcast::error::RecvError::Lagged(_)) => continue,
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    })
    .await
    .ok()
    .flatten()
}
