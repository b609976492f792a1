//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration - permissive for development, should be restricted in production
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build the API router with versioned endpoints
    let api_v1 = Router::new()
        // Public storefront
        .route("/menu", get(handlers::get_menu))
        .route("/brand", get(handlers::get_brand))
        // Auth
        .route("/admin/login", post(handlers::login))
        .route("/admin/logout", post(handlers::logout))
        // Store settings
        .route(
            "/admin/store",
            get(handlers::get_store).patch(handlers::update_store),
        )
        // Categories
        .route(
            "/admin/categories",
            get(handlers::list_categories).post(handlers::create_category),
        )
        .route(
            "/admin/categories/{id}",
            axum::routing::patch(handlers::update_category).delete(handlers::delete_category),
        )
        // Items
        .route(
            "/admin/items",
            get(handlers::list_items).post(handlers::create_item),
        )
        .route(
            "/admin/items/{id}",
            axum::routing::patch(handlers::update_item).delete(handlers::delete_item),
        )
        // Special offers
        .route(
            "/admin/special-items",
            get(handlers::list_special_items).post(handlers::create_special_item),
        )
        .route(
            "/admin/special-items/{id}",
            axum::routing::patch(handlers::update_special_item)
                .delete(handlers::delete_special_item),
        )
        // Uploads
        .route("/admin/upload", post(handlers::upload));

    // Combine all routes
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/v1", api_v1)
        // Sized for image uploads.
        .layer(DefaultBodyLimit::max(15 * 1024 * 1024))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
