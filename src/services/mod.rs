//! Service layer: the deterministic core components.
//!
//! Both services are pure, synchronous and stateless: no I/O, no shared
//! mutable state, safe to call concurrently from any number of request
//! tasks. The HTTP layer calls the open-status evaluator once per public
//! render and the session codec on login and on every guarded request.

pub mod open_status;
pub mod session;

pub use open_status::{compute_open_status, compute_open_status_at, open_status_at};
pub use session::{IssuedSession, SessionCodec, SessionPayload, SESSION_COOKIE};


#[cfg(test)]
#[path = "session_tests.rs"]
mod session_tests;
