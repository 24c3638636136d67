//! Kite Gateway Binary
//!
//! Serves the brokerage session façade over HTTP.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin kite-gateway
//! ```
//!
//! # Environment Variables
//!
//! ## Required
//! - `KITE_CONNECT_API_KEY`: Kite Connect API key
//! - `KITE_CONNECT_API_SECRET`: Kite Connect API secret
//!
//! ## Optional
//! - `BACKEND_PORT`: HTTP listen port (default: 7140)
//! - `KITE_API_BASE_URL`: REST base URL (default: <https://api.kite.trade>)
//! - `KITE_LOGIN_BASE_URL`: Login base URL (default: <https://kite.zerodha.com>)
//! - `KITE_HTTP_TIMEOUT_SECS`: Upstream request timeout (default: 30)
//! - `OTEL_ENABLED`: Enable OpenTelemetry (default: false)
//! - `OTEL_EXPORTER_OTLP_ENDPOINT`: OTLP endpoint (default: <http://localhost:4317>)
//! - `OTEL_SERVICE_NAME`: Service name (default: kite-gateway)
//! - `RUST_LOG`: Log level (default: info)

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use kite_gateway::{
    AppState, GatewayConfig, KiteBrokerAdapter, SessionGateway, create_router, init_metrics,
    init_telemetry,
};
use tokio::net::TcpListener;
use tokio::signal;
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv();

    let _telemetry_guard = init_telemetry().context("failed to initialize telemetry")?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting Kite Gateway");

    if let Err(e) = init_metrics() {
        tracing::warn!(error = %e, "Prometheus recorder unavailable, /metrics disabled");
    }

    let config = GatewayConfig::from_env().context("invalid configuration")?;
    log_config(&config);

    let adapter = KiteBrokerAdapter::new(&config.kite_config())
        .context("failed to build Kite HTTP client")?;
    let gateway = SessionGateway::new(Arc::new(adapter), config.credentials.api_secret());
    let app = create_router(AppState::new(gateway));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "HTTP server listening");

    let shutdown_token = CancellationToken::new();
    tokio::spawn(await_shutdown(shutdown_token.clone()));

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_token.cancelled_owned())
        .await
        .context("HTTP server error")?;

    tracing::info!("Kite Gateway stopped");
    Ok(())
}

/// Load .env file, falling back to the nearest ancestor directory.
fn load_dotenv() {
    if dotenvy::dotenv().is_ok() {
        return;
    }

    if let Ok(cwd) = std::env::current_dir() {
        for dir in cwd.ancestors().skip(1) {
            let env_path = dir.join(".env");
            if env_path.exists() {
                let _ = dotenvy::from_path(&env_path);
                return;
            }
        }
    }
}

/// Log the parsed configuration.
fn log_config(config: &GatewayConfig) {
    let kite = config.kite_config();
    tracing::info!(
        port = config.server.port,
        timeout_secs = config.kite.timeout.as_secs(),
        "Configuration loaded"
    );
    tracing::debug!(
        api_base_url = %kite.api_base_url,
        login_base_url = %kite.login_base_url,
        "Kite endpoints"
    );
}

/// Wait for SIGINT or SIGTERM, then cancel the token.
async fn await_shutdown(shutdown_token: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Received Ctrl+C, shutting down"),
        () = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }

    shutdown_token.cancel();
}
