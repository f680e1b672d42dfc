// src/models/claims.rs
//! Auth token claims and header data models.
//!
//! Defines the claim set embedded in a bearer token and the fixed header
//! identifying the token type and signature scheme.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default token lifetime: five hours.
pub const DEFAULT_TOKEN_VALIDITY_SECS: i64 = 5 * 60 * 60;

/// Token type identifier carried in every token header.
pub const TOKEN_TYPE: &str = "AUTH";

/// Claims carried by an auth token.
///
/// Field order is load-bearing: the issuer signs the serialized claims, and
/// the authenticator re-serializes the deserialized struct to reproduce the
/// exact signed bytes. Serde emits fields in declaration order, which makes
/// that serialization deterministic.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AuthClaims {
    /// Issuer: the relying party's own signing identity
    pub iss: String,

    /// Subject: the identity proven by the login payload
    pub sub: String,

    /// Audience domain the token is valid for
    /// Example: "example.com"
    pub aud: String,

    /// Not valid before, unix seconds
    pub nbf: i64,

    /// Expiry, unix seconds
    pub exp: i64,

    /// Issued at, unix seconds
    pub iat: i64,

    /// Unique token identifier, a fresh random UUID at issuance
    pub jti: String,
}

/// Optional overrides for token issuance.
#[derive(Debug, Clone, Default)]
pub struct TokenOptions {
    /// Not-before instant; defaults to issuance time when absent
    pub invalid_before: Option<DateTime<Utc>>,

    /// Expiry instant; defaults to issuance time + 5 hours when absent
    pub expiration_time: Option<DateTime<Utc>>,
}

/// Fixed header identifying the token type and signature scheme.
///
/// Serialized as the first token segment: `{ "alg": ..., "typ": "AUTH" }`.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct TokenHeader {
    /// Signature scheme identifier
    /// Example: "ES256K-R"
    pub alg: String,

    /// Token type, always "AUTH"
    pub typ: String,
}
