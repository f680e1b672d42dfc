// src/main.rs

//! # Wallet Auth System - Service Entry Point
//!
//! This binary runs the relying-party side of the wallet authentication
//! protocol: it verifies signed login payloads, mints bearer tokens, and
//! authenticates presented tokens over a small HTTP API.
//!
//! ## Initialization Sequence
//! 1. Load environment configuration
//! 2. Build the relying party's signing key manager
//! 3. Wire the protocol services around it
//! 4. Start the API server
//!
//! ## Environment Variables
//! - `AUTH_DOMAIN`: Domain logins and tokens are scoped to (required)
//! - `AUTH_SIGNING_KEY`: Hex secp256k1 secret key (optional; an ephemeral
//!   key is generated when absent)
//! - `AUTH_SCHEME`: (Optional) `ethereum` (default) or `ed25519`
//! - `BIND_ADDRESS`: (Optional) listen address (default: 127.0.0.1:3000)
//! - `TOKEN_TTL_SECS`: (Optional) token lifetime (default: 5 hours)

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;

use wallet_auth::config::AuthConfig;
use wallet_auth::services::api_server::ApiServer;
use wallet_auth::services::login_verifier::LoginVerifier;
use wallet_auth::services::token_authenticator::TokenAuthenticator;
use wallet_auth::services::token_issuer::TokenIssuer;
use wallet_auth::storage::nonce_store::MemoryNonceStore;
use wallet_auth::wallet::signer::SignerAdapter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    // Load environment variables from .env / the process environment
    let config = AuthConfig::from_env()
        .context("AUTH_DOMAIN must be set (see .env.example variables in the module docs)")?;

    // The relying party's own signing identity
    let key_manager = Arc::new(config.build_key_manager()?);
    let identity = key_manager.get_identity()?;
    log::info!("relying party identity: {}", identity);

    // Single-use nonce enforcement, shared by every verifier instance
    let nonce_store = Arc::new(MemoryNonceStore::new());

    // Wire the protocol services around the key manager
    let login_verifier = LoginVerifier::new(key_manager.scheme())
        .with_nonce_store(nonce_store);
    let token_issuer = TokenIssuer::new(login_verifier.clone(), Some(key_manager.clone()))
        .with_validity_secs(config.token_ttl_secs);
    let token_authenticator = TokenAuthenticator::new(key_manager);

    let api_server = ApiServer::new(
        config.domain.clone(),
        login_verifier,
        token_issuer,
        token_authenticator,
    );

    // Start the HTTP server
    let addr: SocketAddr = config
        .bind_address
        .parse()
        .context("BIND_ADDRESS is not a valid socket address")?;
    println!("auth service for {} running at http://{}", config.domain, addr);
    println!("Available endpoints:");
    println!("- POST /auth/verify");
    println!("- POST /auth/token");
    println!("- GET  /auth/me");

    api_server.run(addr).await
}
