//! Report-and-resynchronize step run after a session completes

use std::sync::Arc;
use tracing::{error, info, warn};

use crate::{
    config::ReportFailurePolicy,
    state::{AppState, ReportStatus, TimerEvent},
    timer::SessionRecord,
};

/// Send the record once; on success rebuild the widget, on failure apply the policy
///
/// The completed state is never rolled back. No retry is attempted.
pub async fn report_and_resynchronize(state: Arc<AppState>, record: SessionRecord) {
    info!("Reporting {} minute {} session", record.duration, record.mode);

    match state.reporter().report(record.clone()).await {
        Ok(ack) => {
            match ack.xp_gained {
                Some(xp) => info!("Session recorded, {} XP added", xp),
                None => info!("Session recorded"),
            }

            let status = ReportStatus::delivered(record.clone(), ack.xp_gained);
            if let Err(e) = state.set_last_report(status) {
                error!("Failed to store report status: {}", e);
            }
            state.broadcast(TimerEvent::Reported { record, xp_gained: ack.xp_gained });

            if let Err(e) = state.resynchronize() {
                error!("Failed to resynchronize timer: {}", e);
            }
        }
        Err(e) => {
            warn!("Session report failed: {}", e);

            if state.failure_policy == ReportFailurePolicy::Surface {
                let message = e.to_string();
                let status = ReportStatus::failed(record.clone(), message.clone());
                if let Err(e) = state.set_last_report(status) {
                    error!("Failed to store report status: {}", e);
                }
                state.broadcast(TimerEvent::ReportFailed { record, error: message });
            }
        }
    }
}
