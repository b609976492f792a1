//! Session cookie handling and the admin route guard.
//!
//! The guard is an axum extractor: admin handlers take an [`AdminSession`]
//! argument and receive the authenticated store id, or the request is
//! rejected with a uniform 401 before the handler runs. Missing cookie,
//! malformed token, bad signature and expiry are indistinguishable to the
//! client.

use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts, HeaderMap};
use chrono::{DateTime, Utc};

use super::error::AppError;
use super::state::AppState;
use crate::services::session::{SessionPayload, SESSION_COOKIE};

/// An authenticated admin session, extracted from the request cookie.
#[derive(Debug, Clone)]
pub struct AdminSession(pub SessionPayload);

impl AdminSession {
    /// The authenticated tenant (store) id.
    pub fn store_id(&self) -> &str {
        &self.0.sub
    }
}

impl FromRequestParts<AppState> for AdminSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        cookie_value(&parts.headers, SESSION_COOKIE)
            .and_then(|token| state.sessions.verify(&token))
            .map(AdminSession)
            .ok_or(AppError::Unauthorized)
    }
}

/// Pull a cookie's value out of the `Cookie` request header.
pub fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    let raw = headers.get(header::COOKIE)?.to_str().ok()?;
    raw.split(';').find_map(|pair| {
        let (k, v) = pair.split_once('=')?;
        (k.trim() == name).then(|| v.trim().to_string())
    })
}

/// `Set-Cookie` value installing the session token until `expires_at`.
pub fn session_cookie(token: &str, expires_at: DateTime<Utc>) -> String {
    format!(
        "{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax; Expires={}",
        expires_at.format("%a, %d %b %Y %H:%M:%S GMT")
    )
}

/// `Set-Cookie` value clearing the session cookie (epoch expiry).
pub fn clear_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Expires=Thu, 01 Jan 1970 00:00:00 GMT")
}
