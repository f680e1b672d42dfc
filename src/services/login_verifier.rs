// src/services/login_verifier.rs
//! Login verification service.
//!
//! Server-side role of the protocol: authenticates a signed login payload
//! against the expected relying-party domain and returns the proven
//! identity. Checks run in a fixed order and fail closed on the first
//! failing check.

use std::sync::Arc;

use ethers::utils::hex;

use crate::errors::AuthError;
use crate::models::challenge::LoginPayload;
use crate::storage::nonce_store::NonceStore;
use crate::utils::clock::{Clock, SystemClock};
use crate::utils::message::canonicalize;
use crate::wallet::scheme::SignatureScheme;

/// Login payload verifier for one signature scheme.
///
/// The verifier is stateless apart from the optional nonce store: time is
/// read fresh from the injected clock on every call, and nothing else is
/// recorded. Safe to share across concurrent requests.
#[derive(Clone)]
pub struct LoginVerifier {
    /// Scheme the claimed identities are verified under
    scheme: &'static dyn SignatureScheme,

    /// Time source for the expiry check
    clock: Arc<dyn Clock>,

    /// Optional single-use nonce enforcement
    nonce_store: Option<Arc<dyn NonceStore>>,
}

impl LoginVerifier {
    /// Creates a verifier for `scheme` with the system clock and no
    /// replay protection.
    pub fn new(scheme: &'static dyn SignatureScheme) -> Self {
        LoginVerifier {
            scheme,
            clock: Arc::new(SystemClock),
            nonce_store: None,
        }
    }

    /// Replaces the time source (used by tests for deterministic expiry).
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Enables single-use nonce enforcement through `store`.
    pub fn with_nonce_store(mut self, store: Arc<dyn NonceStore>) -> Self {
        self.nonce_store = Some(store);
        self
    }

    /// The scheme this verifier checks signatures under.
    pub fn scheme(&self) -> &'static dyn SignatureScheme {
        self.scheme
    }

    /// Authenticates `payload` against `domain`, returning the proven
    /// identity.
    ///
    /// # Validation Order (first failing check wins)
    /// 1. Challenge domain equals `domain` exactly, else [`AuthError::DomainMismatch`]
    /// 2. `now <= expiration_time`, boundary inclusive, else [`AuthError::Expired`]
    /// 3. Signature over the re-canonicalized challenge verifies against
    ///    the claimed address, else [`AuthError::InvalidSignature`]
    /// 4. With a nonce store configured: `(domain, nonce)` is fresh, else
    ///    [`AuthError::NonceAlreadyUsed`]
    ///
    /// # Guarantees
    /// On success the returned identity is exactly
    /// `payload.payload.address`, cryptographically proven to have signed
    /// the canonical challenge text within its validity window and for the
    /// claimed domain.
    pub fn verify(&self, domain: &str, payload: &LoginPayload) -> Result<String, AuthError> {
        let challenge = &payload.payload;

        if challenge.domain != domain {
            return Err(AuthError::DomainMismatch {
                expected: domain.to_string(),
                actual: challenge.domain.clone(),
            });
        }

        if self.clock.now() > challenge.expiration_time {
            return Err(AuthError::Expired);
        }

        let message = canonicalize(challenge);
        let signature = hex::decode(payload.signature.trim_start_matches("0x"))
            .map_err(|_| AuthError::Malformed("signature is not valid hex".to_string()))?;
        if !self.scheme.verify(&message, &signature, &challenge.address)? {
            return Err(AuthError::InvalidSignature);
        }

        // Only cryptographically proven payloads consume nonces, so an
        // unauthenticated flood cannot poison the store
        if let Some(store) = &self.nonce_store {
            if !store.consume(domain, &challenge.nonce, challenge.expiration_time)? {
                return Err(AuthError::NonceAlreadyUsed);
            }
        }

        log::debug!("verified login for {} on {}", challenge.address, domain);
        Ok(challenge.address.clone())
    }
}
