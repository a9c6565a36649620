//! Integration tests for JWT auth and password hashing.
//!
//! Tokens are minted locally with the same HS256 secret the server would
//! use, then validated through `validate_token`. No running server or
//! database is needed.
//!
//! Run with: `cargo test --test auth_test`
use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use uuid::Uuid;

use talentlink_backend::auth::jwt::{Claims, create_token, validate_token};
use talentlink_backend::auth::password::{hash_password, verify_password};

/// A fake secret for testing — never use the real one in tests committed to git.
const TEST_SECRET: &str = "test-secret-at-least-256-bits-long-for-hs256-xxxxxxx";

#[test]
fn test_minted_token_decodes_correctly() {
    let user_id = Uuid::new_v4();
    let token = create_token(user_id, "alice", TEST_SECRET).expect("Failed to mint token");

    let claims = validate_token(&token, TEST_SECRET).expect("Token should be valid");

    assert_eq!(claims.sub, user_id.to_string());
    assert_eq!(claims.username.as_deref(), Some("alice"));
    assert_eq!(claims.user_id().unwrap(), user_id);
}

#[test]
fn test_expired_token_is_rejected() {
    let now = Utc::now().timestamp() as usize;

    let claims = Claims {
        sub: Uuid::new_v4().to_string(),
        exp: now - 300, // expired 5 minutes ago (well past the 60s default leeway)
        iat: Some(now - 3600),
        username: Some("expired".to_string()),
    };

    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .unwrap();

    let result = validate_token(&token, TEST_SECRET);
    assert!(result.is_err());
    assert!(result.unwrap_err().contains("ExpiredSignature"));
}

#[test]
fn test_wrong_secret_is_rejected() {
    let token = create_token(Uuid::new_v4(), "bob", TEST_SECRET).unwrap();

    let result = validate_token(&token, "completely-wrong-secret-xxxxxxxxxxxxxxxxxxx");
    assert!(result.is_err());
    assert!(result.unwrap_err().contains("InvalidSignature"));
}

#[test]
fn test_garbage_token_is_rejected() {
    let result = validate_token("not.a.valid.jwt", TEST_SECRET);
    assert!(result.is_err());
}

#[test]
fn test_invalid_sub_claim_is_rejected() {
    let now = Utc::now().timestamp() as usize;

    let claims = Claims {
        sub: "not-a-uuid".to_string(),
        exp: now + 3600,
        iat: Some(now),
        username: None,
    };

    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .unwrap();

    // The token itself validates, but the sub claim is unusable.
    let claims = validate_token(&token, TEST_SECRET).expect("Token should be valid");
    assert!(claims.user_id().is_err());
}

#[test]
fn test_password_hash_roundtrip() {
    let hash = hash_password("hunter2-but-longer").expect("Hashing should succeed");

    // Argon2 PHC strings are self-describing and salted.
    assert!(hash.starts_with("$argon2"));
    assert!(verify_password("hunter2-but-longer", &hash));
    assert!(!verify_password("wrong-password", &hash));
}

#[test]
fn test_password_hashes_are_salted() {
    let first = hash_password("same-password").unwrap();
    let second = hash_password("same-password").unwrap();

    assert_ne!(first, second);
    assert!(verify_password("same-password", &first));
    assert!(verify_password("same-password", &second));
}

#[test]
fn test_garbage_hash_verifies_as_false() {
    assert!(!verify_password("anything", "not-a-phc-string"));
}
