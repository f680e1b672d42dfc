// src/services/token_issuer.rs
//! Auth token issuance service.
//!
//! Server-side role of the protocol: converts a verified login payload
//! into a transmittable bearer token signed by the relying party's own
//! key. The token is self-contained: three URL-safe base64 segments
//! (header, claims, signature) joined by dots.

use std::sync::Arc;

use chrono::Duration;
use uuid::Uuid;

use crate::errors::AuthError;
use crate::models::challenge::LoginPayload;
use crate::models::claims::{AuthClaims, TokenHeader, TokenOptions, DEFAULT_TOKEN_VALIDITY_SECS, TOKEN_TYPE};
use crate::services::login_verifier::LoginVerifier;
use crate::utils::clock::{Clock, SystemClock};
use crate::utils::serialization::{encode_segment, to_canonical_json};
use crate::wallet::signer::SignerAdapter;

/// Service minting bearer tokens from verified logins.
///
/// The issuer adapter is optional: only a server/service context holds the
/// relying party's private signing key, and a `TokenIssuer` constructed
/// without one refuses to mint. This is a deployment-mode guard, not a
/// cryptographic one.
#[derive(Clone)]
pub struct TokenIssuer {
    /// Relying party's own signing adapter, present only in contexts
    /// authorized to hold the private key
    issuer_adapter: Option<Arc<dyn SignerAdapter>>,

    /// Login verifier run before any token is minted
    verifier: LoginVerifier,

    /// Time source for claim timestamps
    clock: Arc<dyn Clock>,

    /// Default token lifetime when the caller does not override `exp`
    validity_secs: i64,
}

impl TokenIssuer {
    /// Creates a new TokenIssuer.
    ///
    /// # Arguments
    /// * `verifier` - Login verifier consulted before issuance
    /// * `issuer_adapter` - The relying party's signing adapter, or `None`
    ///   in contexts not authorized to hold the private key
    pub fn new(verifier: LoginVerifier, issuer_adapter: Option<Arc<dyn SignerAdapter>>) -> Self {
        TokenIssuer {
            issuer_adapter,
            verifier,
            clock: Arc::new(SystemClock),
            validity_secs: DEFAULT_TOKEN_VALIDITY_SECS,
        }
    }

    /// Replaces the time source (used by tests for deterministic claims).
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Overrides the default token lifetime.
    pub fn with_validity_secs(mut self, secs: i64) -> Self {
        self.validity_secs = secs;
        self
    }

    /// Verifies `payload` for `domain` and mints a signed bearer token.
    ///
    /// # Process Flow
    /// 1. Rejects with [`AuthError::ForbiddenContext`] when no issuer
    ///    adapter is held
    /// 2. Runs login verification, propagating its failures unchanged
    /// 3. Builds the claim set (`iss` = own identity, `sub` = proven
    ///    identity, `aud` = domain, `nbf`/`exp` from `options` or
    ///    defaults, `iat` = now, `jti` = fresh UUID)
    /// 4. Signs the canonical claims bytes and assembles the three
    ///    segments
    pub async fn generate_auth_token(
        &self,
        domain: &str,
        payload: &LoginPayload,
        options: &TokenOptions,
    ) -> Result<String, AuthError> {
        let issuer = self
            .issuer_adapter
            .as_ref()
            .ok_or(AuthError::ForbiddenContext)?;

        let subject = self.verifier.verify(domain, payload)?;

        let now = self.clock.now();
        let claims = AuthClaims {
            iss: issuer.get_identity()?,
            sub: subject,
            aud: domain.to_string(),
            nbf: options
                .invalid_before
                .map(|t| t.timestamp())
                .unwrap_or_else(|| now.timestamp()),
            exp: options
                .expiration_time
                .map(|t| t.timestamp())
                .unwrap_or_else(|| (now + Duration::seconds(self.validity_secs)).timestamp()),
            iat: now.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        let header = TokenHeader {
            alg: issuer.scheme().alg().to_string(),
            typ: TOKEN_TYPE.to_string(),
        };

        let claims_json = to_canonical_json(&claims)?;
        let signature = issuer.sign(&claims_json).await?;
        log::debug!("issued token {} for {} on {}", claims.jti, claims.sub, domain);

        Ok(format!(
            "{}.{}.{}",
            encode_segment(&to_canonical_json(&header)?),
            encode_segment(&claims_json),
            encode_segment(&signature),
        ))
    }
}
