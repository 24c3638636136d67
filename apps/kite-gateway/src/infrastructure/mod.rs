//! Infrastructure Layer
//!
//! Adapters for the ports defined in the application layer, plus the
//! inbound HTTP surface:
//!
//! - **Driven Adapters (Outbound)**
//!   - `kite/`: Kite Connect REST adapter implementing `BrokeragePort`
//!
//! - **Driver Adapters (Inbound)**
//!   - `http/`: Axum router, DTOs and request logging
//!
//! - **Cross-cutting**
//!   - `config/`: Environment configuration
//!   - `telemetry/`: Tracing subscriber and OTLP export
//!   - `metrics/`: Prometheus recorder and metric helpers

pub mod config;
pub mod http;
pub mod kite;
pub mod metrics;
pub mod telemetry;
