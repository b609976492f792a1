//! Application configuration loaded from environment variables.

use std::env;

use crate::services::open_status::DEFAULT_TIMEZONE;
use crate::services::session::{DEFAULT_TTL_DAYS, DEV_SECRET};

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Bind host (default: 0.0.0.0)
    pub host: String,
    /// Bind port (default: 8080)
    pub port: u16,
    /// Session signing secret. Falls back to the insecure dev constant
    /// when `AUTH_SECRET` is unset.
    pub auth_secret: String,
    /// Session lifetime in days (default: 7)
    pub session_ttl_days: i64,
    /// Fallback IANA timezone for stores without one (default: Asia/Amman)
    pub default_timezone: String,
    /// Directory uploads are written to by the filesystem backend
    /// (default: ./uploads)
    pub upload_dir: String,
    /// Public base URL uploads are served from (default: http://localhost:8080/uploads)
    pub public_base_url: String,
    /// Credentials the local repository seeds its demo store with
    /// (defaults: demo / demo123)
    pub seed_username: String,
    pub seed_password: String,
}

impl AppConfig {
    /// Create a configuration from environment variables.
    ///
    /// # Environment Variables
    /// - `HOST`, `PORT`
    /// - `AUTH_SECRET`: session signing secret (dev fallback if unset)
    /// - `SESSION_TTL_DAYS`
    /// - `DEFAULT_TIMEZONE`: IANA identifier
    /// - `UPLOAD_DIR`, `PUBLIC_BASE_URL`: filesystem upload backend
    /// - `SEED_USERNAME`, `SEED_PASSWORD`: demo store credentials
    ///
    /// # Errors
    /// Returns an error when a set variable fails to parse.
    pub fn from_env() -> Result<Self, String> {
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .map_err(|_| "PORT must be a valid port number".to_string())?;
        let auth_secret = env::var("AUTH_SECRET").unwrap_or_else(|_| DEV_SECRET.to_string());
        let session_ttl_days = env::var("SESSION_TTL_DAYS")
            .unwrap_or_else(|_| DEFAULT_TTL_DAYS.to_string())
            .parse()
            .map_err(|_| "SESSION_TTL_DAYS must be an integer".to_string())?;
        let default_timezone =
            env::var("DEFAULT_TIMEZONE").unwrap_or_else(|_| DEFAULT_TIMEZONE.to_string());
        let upload_dir = env::var("UPLOAD_DIR").unwrap_or_else(|_| "./uploads".to_string());
        let public_base_url = env::var("PUBLIC_BASE_URL")
            .unwrap_or_else(|_| format!("http://localhost:{port}/uploads"));
        let seed_username = env::var("SEED_USERNAME").unwrap_or_else(|_| "demo".to_string());
        let seed_password = env::var("SEED_PASSWORD").unwrap_or_else(|_| "demo123".to_string());

        Ok(Self {
            host,
            port,
            auth_secret,
            session_ttl_days,
            default_timezone,
            upload_dir,
            public_base_url,
            seed_username,
            seed_password,
        })
    }

    /// True when running on the insecure development secret.
    pub fn uses_dev_secret(&self) -> bool {
        self.auth_secret == DEV_SECRET
    }
}
