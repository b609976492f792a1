//! QR-Menu HTTP Server Binary
//!
//! This is the main entry point for the QR-menu REST API server.
//! It initializes the repository and storage backends, sets up the HTTP
//! router, and starts serving requests.
//!
//! # Usage
//!
//! ```bash
//! # Run with the in-memory repository and filesystem uploads (default)
//! cargo run --bin qrmenu-server --features "local-repo,http-server"
//!
//! # Run with S3-compatible (Cloudflare R2) uploads
//! R2_ACCOUNT_ID=... R2_ACCESS_KEY_ID=... R2_SECRET_ACCESS_KEY=... \
//!   R2_BUCKET=... R2_PUBLIC_BASE=https://pub-xxx.r2.dev \
//!   cargo run --bin qrmenu-server --features "local-repo,http-server,s3-uploads"
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `AUTH_SECRET`: Session signing secret (insecure dev fallback if unset)
//! - `SESSION_TTL_DAYS`: Session lifetime (default: 7)
//! - `DEFAULT_TIMEZONE`: Fallback IANA timezone (default: Asia/Amman)
//! - `UPLOAD_DIR`, `PUBLIC_BASE_URL`: Filesystem upload backend
//! - `SEED_USERNAME`, `SEED_PASSWORD`: Demo store admin credentials
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use qrmenu_rust::config::AppConfig;
use qrmenu_rust::db::{self, repositories::LocalRepository};
use qrmenu_rust::http::{create_router, AppState};
use qrmenu_rust::services::session::SessionCodec;
use qrmenu_rust::storage::{FsStorage, ObjectStorage};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .init();

    info!("Starting QR-Menu HTTP Server");

    let config = AppConfig::from_env().map_err(|e| anyhow::anyhow!(e))?;
    if config.uses_dev_secret() {
        warn!("AUTH_SECRET is not set; sessions are signed with the insecure dev secret");
    }

    // Initialize global repository once and reuse it across the app
    let repository = Arc::new(LocalRepository::seeded(
        &config.seed_username,
        &config.seed_password,
        &config.default_timezone,
    )) as Arc<dyn db::repository::FullRepository>;
    db::init_repository(Arc::clone(&repository))?;
    info!("Repository initialized (in-memory, demo store seeded)");

    let storage = build_storage(&config).await?;
    info!(base = %storage.public_base(), "Upload storage ready");

    // Create application state
    let state = AppState::new(
        repository,
        Arc::new(SessionCodec::new(config.auth_secret.clone())),
        storage,
        config.default_timezone.clone(),
        config.session_ttl_days,
    );

    // Create router with all endpoints
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!("Server listening on http://{}", addr);

    // Start the server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Pick the upload backend: R2 when the feature is compiled in and the
/// environment is configured, filesystem otherwise.
async fn build_storage(config: &AppConfig) -> anyhow::Result<Arc<dyn ObjectStorage>> {
    #[cfg(feature = "s3-uploads")]
    {
        use qrmenu_rust::storage::s3::{R2Config, S3Storage};
        match R2Config::from_env() {
            Ok(r2) => {
                return Ok(Arc::new(S3Storage::connect(&r2).await));
            }
            Err(e) => {
                warn!(reason = %e, "R2 not configured, falling back to filesystem uploads");
            }
        }
    }
    Ok(Arc::new(FsStorage::new(
        &config.upload_dir,
        &config.public_base_url,
    )))
}
