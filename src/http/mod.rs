//! HTTP server module for the QR-menu backend.
//!
//! This module provides an axum-based REST API over the repository, session,
//! and storage layers: a public storefront surface (menu, brand, live open
//! status) and a cookie-authenticated admin surface (store settings, menu
//! CRUD, image uploads).
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  HTTP Layer (axum handlers)                               │
//! │  - Request parsing and validation                         │
//! │  - Session cookie guard (AdminSession extractor)          │
//! │  - CORS, compression, error handling                      │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Service Layer (services/)                                │
//! │  - Open-status evaluation (working hours + timezone)      │
//! │  - Session token issue/verify (HMAC-SHA256)               │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Repository + Storage (db/, storage/)                     │
//! │  - Store / category / item / special persistence          │
//! │  - Uploaded image objects (filesystem or S3-compatible)   │
//! └──────────────────────────────────────────────────────────┘
//! ```

pub mod auth;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::create_router;
pub use state::AppState;
