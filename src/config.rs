// src/config.rs
//! Environment-driven configuration for the relying-party service.

use std::env;

use ethers::utils::hex;

use crate::errors::AuthError;
use crate::wallet::key_management::KeyManager;

/// Configuration settings for the auth service binary.
pub struct AuthConfig {
    /// Domain logins and tokens are scoped to
    pub domain: String,
    /// Hex-encoded secp256k1 secret key for the relying party
    signing_key: Option<String>,
    /// Signature scheme selection: "ethereum" or "ed25519"
    pub scheme: String,
    /// Socket address the API server binds to
    pub bind_address: String,
    /// Token lifetime in seconds
    pub token_ttl_secs: i64,
}

impl AuthConfig {
    /// Loads configuration from environment variables (reading `.env` first).
    pub fn from_env() -> Result<Self, env::VarError> {
        dotenv::dotenv().ok();

        // Default token lifetime: five hours
        const DEFAULT_TOKEN_TTL_SECS: i64 = 5 * 60 * 60;

        let token_ttl_secs = env::var("TOKEN_TTL_SECS")
            .unwrap_or_else(|_| DEFAULT_TOKEN_TTL_SECS.to_string())
            .parse::<i64>()
            .map_err(|_| env::VarError::NotPresent)?;

        Ok(AuthConfig {
            domain: env::var("AUTH_DOMAIN")?,
            signing_key: env::var("AUTH_SIGNING_KEY").ok(),
            scheme: env::var("AUTH_SCHEME").unwrap_or_else(|_| "ethereum".to_string()),
            bind_address: env::var("BIND_ADDRESS").unwrap_or_else(|_| "127.0.0.1:3000".to_string()),
            token_ttl_secs,
        })
    }

    /// Builds the relying party's key manager from the configured scheme
    /// and key material.
    ///
    /// # Errors
    /// - [`AuthError::Malformed`] for an unknown scheme or non-hex key
    /// - [`AuthError::Adapter`] for key material the scheme rejects
    pub fn build_key_manager(&self) -> Result<KeyManager, AuthError> {
        match self.scheme.as_str() {
            "ethereum" => match &self.signing_key {
                Some(key) => {
                    let bytes = hex::decode(key.trim_start_matches("0x")).map_err(|_| {
                        AuthError::Malformed("AUTH_SIGNING_KEY is not valid hex".to_string())
                    })?;
                    KeyManager::from_secp256k1_bytes(&bytes)
                }
                None => {
                    log::warn!("AUTH_SIGNING_KEY not set; generating an ephemeral signing key");
                    Ok(KeyManager::new_ethereum())
                }
            },
            "ed25519" => {
                // Ed25519 key material is generated per process; tokens do
                // not survive a restart under this scheme
                log::warn!("ed25519 scheme selected; generating an ephemeral signing key");
                KeyManager::new_ed25519()
            }
            other => Err(AuthError::Malformed(format!(
                "unknown AUTH_SCHEME: {}",
                other
            ))),
        }
    }
}
