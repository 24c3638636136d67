#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::significant_drop_tightening,
        clippy::too_many_lines,
        clippy::items_after_statements
    )
)]

//! Kite Gateway - Brokerage Session Facade
//!
//! A small HTTP service that walks a user through the Kite Connect login
//! handshake, keeps the resulting access token in memory and relays
//! authenticated calls to the brokerage.
//!
//! # Layers (inside → outside)
//!
//! - **Domain**: Session slot and opaque holdings payload
//!   - `session`: `Session` and the synchronized `SessionStore`
//!   - `holdings`: Upstream holdings relayed verbatim
//!
//! - **Application**: Use cases and port definitions
//!   - `ports`: `BrokeragePort`, the capability the gateway delegates to
//!   - `gateway`: `SessionGateway` (login URL, token exchange, holdings, logout)
//!
//! - **Infrastructure**: Adapters and external integrations
//!   - `kite`: Kite Connect REST adapter
//!   - `http`: Axum router, DTOs and request logging
//!   - `config`: Environment configuration
//!   - `telemetry`: Tracing subscriber and optional OTLP export
//!   - `metrics`: Prometheus recorder
//!
//! # Session Lifecycle
//!
//! ```text
//! GET  /api/kite/login-url  ──► user logs in at Kite ──► request_token
//! POST /api/kite/session?request_token=..  ──► access_token stored
//! GET  /api/kite/mf/holdings  ──► relayed with stored token
//! DELETE /api/kite/session  ──► token invalidated, slot cleared
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

// =============================================================================
// Module Declarations
// =============================================================================

/// Domain layer - Session state and holdings payload.
pub mod domain;

/// Application layer - Session gateway and port definitions.
pub mod application;

/// Infrastructure layer - Adapters and external integrations.
pub mod infrastructure;

// =============================================================================
// Re-exports
// =============================================================================

// Domain types
pub use domain::{Holdings, Session, SessionStore};

// Application
pub use application::{
    BrokerageError, BrokeragePort, GatewayError, SessionGateway, SessionGrant,
};

// Infrastructure config
pub use infrastructure::config::{
    ConfigError, Credentials, GatewayConfig, KiteSettings, ServerSettings,
};

// Kite adapter
pub use infrastructure::kite::{KiteBrokerAdapter, KiteConfig, KiteError};

// HTTP surface
pub use infrastructure::http::{AppState, create_router};

// Metrics
pub use infrastructure::metrics::init_metrics;

// Telemetry
pub use infrastructure::telemetry::{TelemetryConfig, TelemetryGuard, init as init_telemetry};
