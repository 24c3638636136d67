//! HTTP/REST API adapter.
//!
//! Inbound adapter exposing the session gateway over JSON endpoints.

mod controller;
mod middleware;
mod request;
mod response;

pub use controller::{ApiError, AppState, create_router};
pub use request::*;
pub use response::*;
