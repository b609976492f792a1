use chrono::{Duration, TimeZone, Utc};

use crate::services::session::{ct_eq_for_tests, SessionCodec, DEFAULT_TTL_DAYS};

fn codec() -> SessionCodec {
    SessionCodec::new("unit-test-secret")
}

#[test]
fn test_round_trip_preserves_payload() {
    let c = codec();
    let issued = c.issue("store-42", "demo", Duration::days(DEFAULT_TTL_DAYS));
    let payload = c.verify(&issued.token).expect("fresh token verifies");
    assert_eq!(payload.sub, "store-42");
    assert_eq!(payload.username, "demo");
    assert_eq!(payload.exp, issued.expires_at.timestamp_millis());
}

#[test]
fn test_token_shape() {
    let issued = codec().issue("s", "u", Duration::days(1));
    let dots = issued.token.matches('.').count();
    assert_eq!(dots, 1);
    // base64url alphabet only, no padding.
    assert!(issued
        .token
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')));
}

#[test]
fn test_tampered_signature_is_invalid() {
    let c = codec();
    let issued = c.issue("store-42", "demo", Duration::days(1));
    let (body, sig) = issued.token.split_once('.').unwrap();

    // Flip every character of the signature in turn; all must fail.
    for i in 0..sig.len() {
        let mut chars: Vec<char> = sig.chars().collect();
        chars[i] = if chars[i] == 'A' { 'B' } else { 'A' };
        let forged: String = chars.iter().collect();
        assert!(
            c.verify(&format!("{body}.{forged}")).is_none(),
            "flipped signature byte {i} verified"
        );
    }
}

#[test]
fn test_tampered_body_is_invalid() {
    let c = codec();
    let issued = c.issue("store-42", "demo", Duration::days(1));
    let (body, sig) = issued.token.split_once('.').unwrap();
    let mut chars: Vec<char> = body.chars().collect();
    chars[0] = if chars[0] == 'A' { 'B' } else { 'A' };
    let forged: String = chars.iter().collect();
    assert!(c.verify(&format!("{forged}.{sig}")).is_none());
}

#[test]
fn test_negative_ttl_is_already_expired() {
    let c = codec();
    let issued = c.issue("s", "u", Duration::minutes(-1));
    assert!(c.verify(&issued.token).is_none());
}

#[test]
fn test_expiry_boundary() {
    let c = codec();
    let now = Utc.with_ymd_and_hms(2026, 6, 1, 12, 0, 0).unwrap();
    let issued = c.issue_at("s", "u", Duration::days(7), now);

    // Valid right up to the expiry instant.
    assert!(c.verify_at(&issued.token, issued.expires_at).is_some());
    // Invalid one second past it.
    assert!(c
        .verify_at(&issued.token, issued.expires_at + Duration::seconds(1))
        .is_none());
}

#[test]
fn test_malformed_inputs_are_invalid_without_panicking() {
    let c = codec();
    for token in [
        "",
        "not-a-token",
        "body-with-no-dot",
        ".",
        "a.",
        ".b",
        "a.b.c",
        "!!!.???",
    ] {
        assert!(c.verify(token).is_none(), "{token:?} verified");
    }
}

#[test]
fn test_valid_signature_over_garbage_body_is_invalid() {
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use base64::Engine;
    use hmac::{Hmac, Mac};
    use sha2::Sha256;

    // A correctly signed body that is not base64url JSON still verifies as
    // invalid at the decode/parse step.
    for body in ["@@@@", &URL_SAFE_NO_PAD.encode("not json")] {
        let mut mac = Hmac::<Sha256>::new_from_slice(b"unit-test-secret").unwrap();
        mac.update(body.as_bytes());
        let sig = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());
        assert!(codec().verify(&format!("{body}.{sig}")).is_none());
    }
}

#[test]
fn test_wrong_secret_rejects() {
    let issued = SessionCodec::new("secret-a").issue("s", "u", Duration::days(1));
    assert!(SessionCodec::new("secret-b").verify(&issued.token).is_none());
}

#[test]
fn test_constant_time_eq() {
    assert!(ct_eq_for_tests(b"abc", b"abc"));
    assert!(!ct_eq_for_tests(b"abc", b"abd"));
    assert!(!ct_eq_for_tests(b"abc", b"ab"));
    assert!(ct_eq_for_tests(b"", b""));
}
