//! Repository implementations module.
//!
//! Currently a single backend:
//! - `local`: In-memory implementation for unit testing and local development
#[cfg(feature = "local-repo")]
pub mod local;

#[cfg(feature = "local-repo")]
pub use local::LocalRepository;

#[cfg(all(test, feature = "local-repo"))]
#[path = "local_tests.rs"]
mod local_tests;
