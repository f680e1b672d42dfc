// src/services/token_authenticator.rs
//! Auth token validation service.
//!
//! Server-side role of the protocol: validates a presented bearer token
//! string (structure, audience, validity window, issuer binding, and
//! signature) and returns the authenticated subject identity. Validity is
//! re-derived from the token's contents on every call; no state is kept.

use std::sync::Arc;

use crate::errors::AuthError;
use crate::models::claims::{AuthClaims, TokenHeader, TOKEN_TYPE};
use crate::utils::clock::{Clock, SystemClock};
use crate::utils::serialization::{decode_json_segment, decode_segment, to_canonical_json};
use crate::wallet::signer::SignerAdapter;

/// Bearer token authenticator bound to one service identity.
///
/// The adapter supplies the service's own identity and scheme; a token is
/// only accepted when its `iss` claim matches that identity, binding every
/// token to the service instance allowed to have minted it.
#[derive(Clone)]
pub struct TokenAuthenticator {
    /// The authenticating service's own adapter
    adapter: Arc<dyn SignerAdapter>,

    /// Time source for the validity-window checks
    clock: Arc<dyn Clock>,
}

impl TokenAuthenticator {
    /// Creates a new TokenAuthenticator over the service's own adapter.
    pub fn new(adapter: Arc<dyn SignerAdapter>) -> Self {
        TokenAuthenticator {
            adapter,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replaces the time source (used by tests for boundary checks).
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Validates `token` for `domain` and returns the subject identity.
    ///
    /// # Validation Order (first failing check wins)
    /// 1. Exactly three `.`-separated segments; header and claims decode
    ///    from base64/JSON; header `typ` is `AUTH` and `alg` names the
    ///    authenticator's scheme, else [`AuthError::Malformed`]
    /// 2. `claims.aud` equals `domain`, else [`AuthError::AudienceMismatch`]
    /// 3. `now >= claims.nbf`, else [`AuthError::NotYetValid`]
    /// 4. `now <= claims.exp`, else [`AuthError::Expired`]
    /// 5. Own adapter identity equals `claims.iss`, else
    ///    [`AuthError::IssuerMismatch`]
    /// 6. Signature segment verifies over the re-serialized claims against
    ///    `claims.iss`, else [`AuthError::InvalidSignature`]
    ///
    /// On success returns `claims.sub`.
    pub fn authenticate(&self, domain: &str, token: &str) -> Result<String, AuthError> {
        let segments: Vec<&str> = token.split('.').collect();
        if segments.len() != 3 {
            return Err(AuthError::Malformed(
                "expected three dot-separated token segments".to_string(),
            ));
        }

        let scheme = self.adapter.scheme();
        let header: TokenHeader = decode_json_segment(segments[0])?;
        if header.typ != TOKEN_TYPE {
            return Err(AuthError::Malformed(format!(
                "unexpected token type: {}",
                header.typ
            )));
        }
        if header.alg != scheme.alg() {
            return Err(AuthError::Malformed(format!(
                "unsupported signature scheme: {}",
                header.alg
            )));
        }

        let claims: AuthClaims = decode_json_segment(segments[1])?;

        if claims.aud != domain {
            return Err(AuthError::AudienceMismatch {
                expected: domain.to_string(),
                actual: claims.aud,
            });
        }

        let now = self.clock.now().timestamp();
        if now < claims.nbf {
            return Err(AuthError::NotYetValid);
        }
        if now > claims.exp {
            return Err(AuthError::Expired);
        }

        let own_identity = self.adapter.get_identity()?;
        if !scheme.identities_match(&own_identity, &claims.iss) {
            return Err(AuthError::IssuerMismatch);
        }

        let claims_json = to_canonical_json(&claims)?;
        let signature = decode_segment(segments[2])?;
        if !scheme.verify(&claims_json, &signature, &claims.iss)? {
            return Err(AuthError::InvalidSignature);
        }

        log::debug!("authenticated token {} for {} on {}", claims.jti, claims.sub, domain);
        Ok(claims.sub)
    }
}
