//! Stateless, tamper-evident admin session tokens.
//!
//! A token is `base64url(json payload) + "." + base64url(hmac_sha256)`,
//! unpadded, signed with a process-wide secret. There is no server-side
//! session table: the token is self-contained and verifiable with the
//! secret alone. The cost is non-revocability before natural expiry --
//! logout only clears the client cookie, and a still-valid token presented
//! from another client will keep verifying until it expires. Accepted
//! tradeoff, inherited from the original system.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Duration, Utc};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Cookie name the token travels in.
pub const SESSION_COOKIE: &str = "qrmenu_session";

/// Default session lifetime.
pub const DEFAULT_TTL_DAYS: i64 = 7;

/// Development-only fallback secret, used when `AUTH_SECRET` is unset.
/// INSECURE: anyone knowing it can mint valid sessions. Real deployments
/// must configure `AUTH_SECRET`.
pub const DEV_SECRET: &str = "dev-secret-change";

/// Signed token payload. `exp` is epoch milliseconds, matching the wire
/// format of the original system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionPayload {
    /// Tenant (store) identifier.
    pub sub: String,
    pub username: String,
    pub exp: i64,
}

/// Result of issuing a session: the token string plus the expiry instant
/// the caller attaches to the cookie. Issuance itself performs no I/O.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// HMAC-SHA256 session token codec keyed by an injected secret.
///
/// Both operations are pure over their inputs and the secret; the codec
/// holds no other state and is safe to share across request tasks.
#[derive(Clone)]
pub struct SessionCodec {
    secret: String,
}

impl SessionCodec {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Read the secret from `AUTH_SECRET`, falling back to [`DEV_SECRET`].
    pub fn from_env() -> Self {
        Self::new(std::env::var("AUTH_SECRET").unwrap_or_else(|_| DEV_SECRET.to_string()))
    }

    /// Mint a token for `sub`/`username` expiring `ttl` from now.
    pub fn issue(&self, sub: &str, username: &str, ttl: Duration) -> IssuedSession {
        self.issue_at(sub, username, ttl, Utc::now())
    }

    /// As [`SessionCodec::issue`], with an explicit clock.
    pub fn issue_at(
        &self,
        sub: &str,
        username: &str,
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> IssuedSession {
        let expires_at = now + ttl;
        let payload = SessionPayload {
            sub: sub.to_string(),
            username: username.to_string(),
            exp: expires_at.timestamp_millis(),
        };
        // Serializing a struct of strings and an integer cannot fail.
        let json = serde_json::to_vec(&payload).unwrap_or_default();
        let body = URL_SAFE_NO_PAD.encode(json);
        let signature = self.sign(&body);
        IssuedSession {
            token: format!("{body}.{signature}"),
            expires_at,
        }
    }

    /// Verify a token and return its payload when authentic and unexpired.
    ///
    /// Every failure mode -- missing separator, bad base64, signature
    /// mismatch, unparseable payload, expiry -- collapses to `None` so
    /// callers cannot build an oracle out of the distinction. Never panics
    /// on adversarial input.
    pub fn verify(&self, token: &str) -> Option<SessionPayload> {
        self.verify_at(token, Utc::now())
    }

    /// As [`SessionCodec::verify`], with an explicit clock.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Option<SessionPayload> {
        let (body, signature) = token.split_once('.')?;
        if body.is_empty() || signature.is_empty() || signature.contains('.') {
            return None;
        }
        let expected = self.sign(body);
        if !constant_time_eq(signature.as_bytes(), expected.as_bytes()) {
            return None;
        }
        let json = URL_SAFE_NO_PAD.decode(body).ok()?;
        let payload: SessionPayload = serde_json::from_slice(&json).ok()?;
        if now.timestamp_millis() > payload.exp {
            return None;
        }
        Some(payload)
    }

    fn sign(&self, body: &str) -> String {
        // HMAC-SHA256 accepts keys of any length; construction cannot fail.
        let mut mac = HmacSha256::new_from_slice(self.secret.as_bytes())
            .expect("HMAC-SHA256 accepts keys of any length");
        mac.update(body.as_bytes());
        URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes())
    }
}

/// Constant-time equality over equal-length byte slices.
///
/// A length mismatch returns early: differing lengths are already public
/// information, not a secret-dependent branch. Equal-length inputs are
/// XOR-accumulated over all bytes so timing does not reveal how many
/// leading bytes matched.
pub(crate) fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}

#[cfg(test)]
pub(crate) use constant_time_eq as ct_eq_for_tests;
