//! Outbound session report to the dashboard's `save_session` endpoint

use futures::future::{BoxFuture, FutureExt};
use reqwest::{header, Client};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::timer::SessionRecord;

/// Reasons a session report did not land
#[derive(Debug, Error)]
pub enum ReportError {
    /// The request never got a response (connection refused, DNS, TLS...)
    #[error("Failed to send session report: {0}")]
    Transport(#[from] reqwest::Error),

    /// The dashboard answered with a non-success status
    #[error("Dashboard rejected session report with status {status}")]
    Status { status: u16 },
}

/// Body the dashboard returns on success; every field is optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportAck {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub xp_gained: Option<u32>,
}

impl ReportAck {
    /// Parse a response body, treating anything unexpected as an empty ack
    pub fn from_body(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_default()
    }
}

/// Sends one [`SessionRecord`] per call, with no retry
pub trait SessionReporter: Send + Sync {
    fn report(&self, record: SessionRecord) -> BoxFuture<'static, Result<ReportAck, ReportError>>;
}

/// Reporter that POSTs the record as JSON
#[derive(Debug, Clone)]
pub struct HttpReporter {
    client: Client,
    url: String,
    cookie: Option<String>,
}

impl HttpReporter {
    pub fn new(url: impl Into<String>, cookie: Option<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
            cookie,
        }
    }
}

impl SessionReporter for HttpReporter {
    fn report(&self, record: SessionRecord) -> BoxFuture<'static, Result<ReportAck, ReportError>> {
        debug!("Reporting session {:?} to {}", record, self.url);

        let mut request = self.client.post(&self.url).json(&record);
        if let Some(cookie) = &self.cookie {
            request = request.header(header::COOKIE, cookie.as_str());
        }

        async move {
            let response = request.send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(ReportError::Status { status: status.as_u16() });
            }

            // No body contract beyond the status, so a bad body still counts as delivered
            let body = response.bytes().await.map(|b| b.to_vec()).unwrap_or_default();
            Ok(ReportAck::from_body(&body))
        }
        .boxed()
    }
}
