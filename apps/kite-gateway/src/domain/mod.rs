//! Domain Layer
//!
//! The session slot and the holdings payload. No I/O lives here.

mod holdings;
mod session;

pub use holdings::Holdings;
pub use session::{Session, SessionStore};
