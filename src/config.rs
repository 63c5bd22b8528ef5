//! Configuration and CLI argument handling

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

/// What to do when the dashboard does not accept a completed session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFailurePolicy {
    /// Log the failure and carry on; clients see nothing
    #[default]
    Ignore,
    /// Publish the failure to clients and keep it in the timer status
    Surface,
}

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "focus-timer")]
#[command(about = "A state-managed study session timer that reports completed sessions")]
#[command(version = "1.0.0")]
pub struct Config {
    /// Port to bind the control API to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Dashboard endpoint that records completed sessions
    #[arg(long, default_value = "http://127.0.0.1:5000/focus/save_session")]
    pub report_url: String,

    /// Cookie header carrying the dashboard login session
    #[arg(long)]
    pub cookie: Option<String>,

    /// Behaviour when a session report fails
    #[arg(long, value_enum, default_value_t = ReportFailurePolicy::Ignore)]
    pub on_report_failure: ReportFailurePolicy,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_dashboard() {
        let config = Config::try_parse_from(["focus-timer"]).unwrap();
        assert_eq!(config.address(), "127.0.0.1:20554");
        assert_eq!(config.report_url, "http://127.0.0.1:5000/focus/save_session");
        assert_eq!(config.on_report_failure, ReportFailurePolicy::Ignore);
        assert_eq!(config.cookie, None);
        assert_eq!(config.log_level(), "info");
    }

    #[test]
    fn parses_overrides() {
        let config = Config::try_parse_from([
            "focus-timer",
            "-p",
            "8080",
            "--on-report-failure",
            "surface",
            "--cookie",
            "session=abc",
            "-v",
        ])
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.on_report_failure, ReportFailurePolicy::Surface);
        assert_eq!(config.cookie.as_deref(), Some("session=abc"));
        assert_eq!(config.log_level(), "debug");
    }
}
