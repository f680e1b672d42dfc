// src/errors.rs
//! Error taxonomy for the wallet authentication protocol.
//!
//! Every variant is terminal for the call that produced it: nothing is
//! retried internally, and the first failing validation check short-circuits
//! the rest. Callers must treat any error as "not authenticated"; the
//! specific kind exists for diagnostics and logging, never for granting
//! partial access.

use thiserror::Error;

/// Errors produced by the login and token operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// No connected signer, or the signer refused/failed to produce an
    /// identity or signature.
    #[error("signer adapter error: {0}")]
    Adapter(String),

    /// The login challenge is scoped to a different domain than expected.
    #[error("domain mismatch: expected {expected}, got {actual}")]
    DomainMismatch { expected: String, actual: String },

    /// The token audience does not match the expected domain.
    #[error("audience mismatch: expected {expected}, got {actual}")]
    AudienceMismatch { expected: String, actual: String },

    /// The challenge or token validity window has passed.
    #[error("expired")]
    Expired,

    /// The token is not yet within its validity window.
    #[error("token not yet valid")]
    NotYetValid,

    /// Cryptographic signature verification failed.
    #[error("invalid signature")]
    InvalidSignature,

    /// The token's claimed issuer does not match the verifying service's
    /// own identity.
    #[error("issuer mismatch")]
    IssuerMismatch,

    /// The payload or token does not parse into its expected shape.
    #[error("malformed: {0}")]
    Malformed(String),

    /// An operation requiring the relying-party signing key was invoked in
    /// a context that does not hold one.
    #[error("operation not permitted in this context")]
    ForbiddenContext,

    /// The login nonce has already been consumed for this domain.
    #[error("nonce already used")]
    NonceAlreadyUsed,

    /// JSON serialization or deserialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
