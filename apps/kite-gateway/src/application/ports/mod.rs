//! Application Ports (Driven)
//!
//! Interfaces the application uses to reach external systems.

mod brokerage_port;

pub use brokerage_port::{BrokerageError, BrokeragePort, SessionGrant};
