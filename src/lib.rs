//! # QR-Menu Rust Backend
//!
//! Backend for a restaurant QR-code menu: a public storefront API serving a
//! store's branding, working hours with live open/closed status, categorized
//! menu items and time-bounded special offers, plus a session-protected
//! admin API for managing all of it.
//!
//! ## Features
//!
//! - **Open-status evaluation**: weekly schedule + IANA timezone in, live
//!   `{is_open, label, minutes_until_change}` out, DST-correct via chrono-tz
//! - **Stateless sessions**: HMAC-SHA256-signed, base64url-encoded expiring
//!   tokens carried in an HttpOnly cookie
//! - **Menu management**: categories, items, and dated special offers with
//!   pagination, filtering, and per-store slug uniqueness
//! - **Image uploads**: multipart uploads to filesystem or S3-compatible
//!   object storage, with garbage collection of replaced images
//! - **HTTP API**: RESTful endpoints for the storefront and admin clients
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`models`]: store, menu, and working-hours records
//! - [`services`]: open-status evaluator and session token codec
//! - [`db`]: repository pattern and the in-memory backend
//! - [`storage`]: object storage for uploaded images
//! - [`http`]: axum-based HTTP server and request handlers
//! - [`config`]: environment-driven server configuration

pub mod config;
pub mod db;
pub mod models;
pub mod services;
pub mod storage;

#[cfg(feature = "http-server")]
pub mod http;
