//! Focus Timer - A state-managed study session timer
//!
//! This is the main entry point for the focus-timer application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use focus_timer::{
    api::create_router,
    config::Config,
    services::HttpReporter,
    state::AppState,
    timer::TimerConfig,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("focus_timer={},tower_http=info", config.log_level()))
        .init();

    info!("Starting focus-timer v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, report_url={}, on_report_failure={:?}",
          config.host, config.port, config.report_url, config.on_report_failure);

    let timer_config = TimerConfig::default();
    for (mode, spec) in timer_config.iter() {
        info!("  mode {:<8} {:>2} min  {}", mode.id(), spec.minutes, spec.label);
    }

    let reporter = Arc::new(HttpReporter::new(config.report_url.clone(), config.cookie.clone()));
    let state = AppState::new(timer_config, reporter, config.on_report_failure);

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /mode/:id - Switch mode (pomodoro, short, long)");
    info!("  POST /toggle   - Start or pause the timer");
    info!("  POST /reset    - Reset the current mode");
    info!("  GET  /timer    - Current timer view and last report");
    info!("  GET  /modes    - Configured modes");
    info!("  GET  /events   - Server-sent timer events");
    info!("  GET  /health   - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
