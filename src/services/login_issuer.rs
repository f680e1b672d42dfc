// src/services/login_issuer.rs
//! Login Issuer Service
//!
//! Client-side role of the protocol: builds a login challenge for a
//! relying-party domain and obtains the connected wallet's signature over
//! its canonical rendering, producing the payload the server verifies.

use std::sync::Arc;

use ethers::utils::hex;

use crate::errors::AuthError;
use crate::models::challenge::{LoginChallenge, LoginOptions, LoginPayload};
use crate::utils::clock::{Clock, SystemClock};
use crate::utils::message::canonicalize;
use crate::wallet::signer::SignerAdapter;

/// Service producing signed login payloads from a connected wallet.
///
/// Holds the signing adapter and a time source; both are shared, so the
/// issuer is cheap to clone and safe to use from concurrent tasks.
#[derive(Clone)]
pub struct LoginIssuer {
    /// Wallet adapter that resolves the identity and signs the challenge
    adapter: Arc<dyn SignerAdapter>,

    /// Time source for default expiry computation
    clock: Arc<dyn Clock>,
}

impl LoginIssuer {
    /// Creates a new LoginIssuer over the given wallet adapter.
    pub fn new(adapter: Arc<dyn SignerAdapter>) -> Self {
        LoginIssuer {
            adapter,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replaces the time source (used by tests for deterministic expiry).
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Builds and signs a login payload scoped to `domain`.
    ///
    /// # Arguments
    /// * `domain` - Relying-party domain, must be non-empty
    /// * `options` - Optional nonce/expiry overrides
    ///
    /// # Process Flow
    /// 1. Resolves the signer's identity via the adapter
    /// 2. Constructs the challenge with supplied or default nonce/expiry
    /// 3. Canonicalizes the challenge and requests a signature over it
    ///
    /// # Guarantees
    /// The returned payload's signature verifies against the adapter's own
    /// identity under the canonical rendering, assuming the adapter is
    /// honest and the payload unmodified in transit.
    ///
    /// # Errors
    /// - [`AuthError::Malformed`] when `domain` is empty
    /// - [`AuthError::Adapter`] when the adapter cannot produce an identity
    ///   or signature (e.g. no connected key)
    pub async fn login(
        &self,
        domain: &str,
        options: &LoginOptions,
    ) -> Result<LoginPayload, AuthError> {
        if domain.is_empty() {
            return Err(AuthError::Malformed("domain must not be empty".to_string()));
        }

        let address = self.adapter.get_identity()?;
        let challenge = LoginChallenge::new(domain, &address, options, self.clock.now());

        let message = canonicalize(&challenge);
        let signature = self.adapter.sign(&message).await?;
        log::debug!("signed login challenge for {} on {}", address, domain);

        Ok(LoginPayload {
            payload: challenge,
            signature: hex::encode(signature),
        })
    }
}
