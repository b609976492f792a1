//! Application state for the HTTP server.

use std::sync::Arc;

use chrono::Duration;

use crate::db::repository::FullRepository;
use crate::services::session::SessionCodec;
use crate::storage::ObjectStorage;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Repository instance for data access
    pub repository: Arc<dyn FullRepository>,
    /// Session token codec, keyed with the process-wide secret
    pub sessions: Arc<SessionCodec>,
    /// Object storage for image uploads
    pub storage: Arc<dyn ObjectStorage>,
    /// Fallback IANA timezone for stores without one
    pub default_timezone: String,
    /// Session lifetime in days
    pub session_ttl_days: i64,
}

impl AppState {
    pub fn new(
        repository: Arc<dyn FullRepository>,
        sessions: Arc<SessionCodec>,
        storage: Arc<dyn ObjectStorage>,
        default_timezone: impl Into<String>,
        session_ttl_days: i64,
    ) -> Self {
        Self {
            repository,
            sessions,
            storage,
            default_timezone: default_timezone.into(),
            session_ttl_days,
        }
    }

    pub fn session_ttl(&self) -> Duration {
        Duration::days(self.session_ttl_days)
    }
}
