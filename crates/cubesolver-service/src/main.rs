//! Cube solver HTTP service entry point.
//!
//! # Configuration
//!
//! - `SERVICE_PORT` / `PORT` - HTTP port (default: 5000)
//! - `CUBE_SOLVER_COMMAND` - External solver program (e.g. `kociemba`)
//! - `CUBE_SOLVER_ARGS` - Extra solver arguments
//! - `CUBE_SOLVER_TIMEOUT_MS` - Solver time limit (default: none)
//! - `CUBE_SOLVER_FALLBACK` - "false" to disable random fallback moves
//! - `RUST_LOG` - Log level (default: info)
//! - `LOG_FORMAT` - Log format: json (default) or text
//! - `METRICS_ENABLED` - "false" to disable Prometheus metrics

use std::net::SocketAddr;

use tracing::info;

use cubesolver_service::router;
use cubesolver_service_shared::{
    init_logging, init_metrics, AppState, LoggingConfig, MetricsConfig, ServiceConfig,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging (reads LOG_FORMAT from environment)
    let logging_config = LoggingConfig::from_env().with_service("cubesolver");
    init_logging(&logging_config);

    // Initialize metrics
    let metrics_config = MetricsConfig::from_env();
    if let Err(e) = init_metrics(&metrics_config) {
        // Log but don't fail - metrics are optional
        tracing::warn!(error = %e, "failed to initialize metrics, continuing without metrics");
    }

    let config = ServiceConfig::from_env();
    info!(
        port = config.port,
        solver = config.solver.command.as_deref().unwrap_or("none"),
        fallback = config.solver.fallback,
        "starting cube solver service"
    );

    let state = AppState::from_config(&config.solver);
    let app = router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!(addr = %addr, "listening on");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
