//! Application Layer
//!
//! Orchestrates the session lifecycle through the brokerage port.
//!
//! - **Ports**: The brokerage capability the gateway delegates to
//! - **Gateway**: Session use cases (login URL, exchange, holdings, logout)
//! - **Errors**: Gateway error taxonomy

mod error;
mod gateway;
pub mod ports;

pub use error::GatewayError;
pub use gateway::{LOGIN_URL_NOTE, SESSION_CREATED_MESSAGE, SessionGateway};
pub use ports::{BrokerageError, BrokeragePort, SessionGrant};
