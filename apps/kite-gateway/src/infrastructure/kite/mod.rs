//! Kite Connect Broker Adapter
//!
//! Implementation of `BrokeragePort` for the Kite Connect v3 REST API:
//! - Login URL construction
//! - Request-token exchange with SHA-256 checksum
//! - Mutual fund holdings
//! - Access token invalidation

mod adapter;
mod api_types;
mod auth;
mod config;
mod error;
mod http_client;

pub use adapter::KiteBrokerAdapter;
pub use auth::session_checksum;
pub use config::KiteConfig;
pub use error::KiteError;
