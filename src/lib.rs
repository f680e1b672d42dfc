// src/lib.rs
//! # Wallet Auth System
//!
//! A public-key, challenge/response authentication protocol: a holder of a
//! cryptographic keypair ("wallet") proves control of that key to a
//! relying-party server and receives a signed, self-contained bearer token
//! for subsequent requests.
//!
//! ## Architecture Overview
//! 1. **Wallet Layer**: `SignerAdapter` contract, signature schemes, and
//!    the local `KeyManager` reference adapter
//! 2. **Services Layer**: the four protocol roles (login issuance, login
//!    verification, token issuance, token authentication) and the HTTP API
//! 3. **Storage Layer**: the external nonce store for replay protection
//! 4. **Utilities**: canonical message rendering, hashing, token segment
//!    serialization, and the injectable clock

// Module declarations (organized by functional domain)
pub mod config; // Environment configuration
pub mod errors; // Protocol error taxonomy
pub mod models; // Data structures
pub mod services; // Protocol roles and API
pub mod storage; // Replay-protection store
pub mod utils; // Canonicalization, hashing, clock
pub mod wallet; // Signing adapter and schemes

pub use config::AuthConfig;
pub use errors::AuthError;
pub use models::challenge::{LoginChallenge, LoginOptions, LoginPayload};
pub use models::claims::{AuthClaims, TokenHeader, TokenOptions};
pub use services::api_server::ApiServer;
pub use services::login_issuer::LoginIssuer;
pub use services::login_verifier::LoginVerifier;
pub use services::token_authenticator::TokenAuthenticator;
pub use services::token_issuer::TokenIssuer;
pub use storage::nonce_store::{MemoryNonceStore, NonceStore};
pub use utils::clock::{Clock, FixedClock, SystemClock};
pub use wallet::key_management::KeyManager;
pub use wallet::scheme::{
    scheme_for_alg, Ed25519Scheme, EthereumScheme, SignatureScheme, ED25519_SCHEME,
    ETHEREUM_SCHEME,
};
pub use wallet::signer::SignerAdapter;
