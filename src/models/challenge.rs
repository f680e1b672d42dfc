// src/models/challenge.rs
//! Login challenge and payload data models.
//!
//! Defines the unsigned challenge a wallet is asked to sign and the signed
//! payload transmitted to the relying party for verification.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default challenge lifetime: five minutes.
pub const DEFAULT_LOGIN_VALIDITY_SECS: i64 = 5 * 60;

/// An unsigned login challenge scoped to a relying-party domain.
///
/// The challenge is rendered to a fixed human-readable message (see
/// [`crate::utils::message::canonicalize`]) and that exact byte sequence is
/// what the wallet signs, so signer and verifier always operate on
/// identical bytes.
///
/// # Fields
/// - `domain`: relying-party identity the login is scoped to
/// - `address`: claimed signer identity
/// - `nonce`: opaque single-use value
/// - `expiration_time`: instant after which the challenge is invalid
///
/// # Serialization
/// The struct supports both JSON serialization and deserialization
/// through Serde's derive macros.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LoginChallenge {
    /// Relying-party domain the login is scoped to
    /// Example: "example.com"
    pub domain: String,

    /// Claimed signer identity
    /// Example: "0xE398f37B9BD1473f79C1B1a726B36CDF1a9aD0ba"
    pub address: String,

    /// Opaque single-use value, a fresh random UUID unless supplied
    /// Example: "123e4567-e89b-12d3-a456-426614174000"
    pub nonce: String,

    /// Absolute instant after which the challenge is invalid
    pub expiration_time: DateTime<Utc>,
}

/// Optional overrides for challenge construction.
#[derive(Debug, Clone, Default)]
pub struct LoginOptions {
    /// Caller-supplied nonce; a fresh UUID v4 is generated when absent
    pub nonce: Option<String>,

    /// Caller-supplied expiry; defaults to now + 5 minutes when absent
    pub expiration_time: Option<DateTime<Utc>>,
}

impl LoginChallenge {
    /// Builds a challenge for `domain` and `address`, filling `nonce` and
    /// `expiration_time` from `options` or their defaults.
    ///
    /// The default expiry is strictly in the future relative to `now`;
    /// callers overriding `expiration_time` may supply any instant.
    pub fn new(domain: &str, address: &str, options: &LoginOptions, now: DateTime<Utc>) -> Self {
        LoginChallenge {
            domain: domain.to_string(),
            address: address.to_string(),
            nonce: options
                .nonce
                .clone()
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            expiration_time: options
                .expiration_time
                .unwrap_or_else(|| now + Duration::seconds(DEFAULT_LOGIN_VALIDITY_SECS)),
        }
    }
}

/// A signed login artifact, transmitted client-to-server once per attempt.
///
/// Consumed exactly once by the verifier and discarded after verification
/// succeeds or fails.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LoginPayload {
    /// The challenge the wallet signed
    pub payload: LoginChallenge,

    /// Hex-encoded signature over the canonical rendering of `payload`
    pub signature: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_challenge_defaults() {
        let now = Utc::now();
        let challenge = LoginChallenge::new("example.com", "0xABC", &LoginOptions::default(), now);

        assert_eq!(challenge.domain, "example.com");
        assert_eq!(challenge.address, "0xABC");
        assert_eq!(
            challenge.expiration_time,
            now + Duration::seconds(DEFAULT_LOGIN_VALIDITY_SECS)
        );
        // Default nonce is a parseable UUID
        assert!(Uuid::parse_str(&challenge.nonce).is_ok());
    }

    #[test]
    fn test_challenge_overrides() {
        let now = Utc::now();
        let expiry = now + Duration::seconds(30);
        let options = LoginOptions {
            nonce: Some("fixed-nonce".to_string()),
            expiration_time: Some(expiry),
        };
        let challenge = LoginChallenge::new("example.com", "0xABC", &options, now);

        assert_eq!(challenge.nonce, "fixed-nonce");
        assert_eq!(challenge.expiration_time, expiry);
    }

    #[test]
    fn test_payload_json_round_trip() {
        let now = Utc::now();
        let payload = LoginPayload {
            payload: LoginChallenge::new("example.com", "0xABC", &LoginOptions::default(), now),
            signature: "deadbeef".to_string(),
        };

        let json = serde_json::to_string(&payload).unwrap();
        let decoded: LoginPayload = serde_json::from_str(&json).unwrap();

        assert_eq!(decoded.payload.domain, payload.payload.domain);
        assert_eq!(decoded.payload.nonce, payload.payload.nonce);
        assert_eq!(decoded.payload.expiration_time, payload.payload.expiration_time);
        assert_eq!(decoded.signature, payload.signature);
    }
}
