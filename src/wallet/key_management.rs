// src/wallet/key_management.rs
//! Cryptographic key management for the local wallet adapter.
//!
//! Provides secure generation and usage of signing keys for the supported
//! signature schemes:
//! - secp256k1 recoverable ECDSA over EIP-191 digests (via the `k256` crate)
//! - Ed25519 over raw message bytes (via the `ring` crate)
//!
//! `KeyManager` is the reference [`SignerAdapter`]: a local in-process
//! keypair. Remote signers (browser wallets, HSM bridges) implement the
//! same trait outside this crate.

use futures::future::BoxFuture;
use k256::ecdsa::SigningKey;
use ring::rand::SystemRandom;
use ring::signature::{Ed25519KeyPair, KeyPair};

use crate::errors::AuthError;
use crate::utils::crypto::hash_personal_message;
use crate::wallet::scheme::{SignatureScheme, ED25519_SCHEME, ETHEREUM_SCHEME};
use crate::wallet::signer::SignerAdapter;

/// Key material for one signature scheme, fixed at construction time.
enum KeyMaterial {
    /// secp256k1 signing key (Ethereum-style identities)
    Secp256k1 { signing_key: SigningKey },
    /// Ed25519 keypair (hex public-key identities)
    Ed25519 { keypair: Ed25519KeyPair },
}

/// Local signing adapter holding one keypair.
///
/// # Security Notes
/// - Secret keys are never exposed publicly
/// - Key generation uses a cryptographically secure RNG
/// - Signatures use deterministic ECDSA (RFC 6979) on the secp256k1 side
pub struct KeyManager {
    /// Securely stored key material (never exposed)
    material: KeyMaterial,
}

impl KeyManager {
    /// Generates a fresh secp256k1 keypair with an Ethereum-style identity.
    pub fn new_ethereum() -> Self {
        let signing_key = SigningKey::random(&mut rand::thread_rng());
        KeyManager {
            material: KeyMaterial::Secp256k1 { signing_key },
        }
    }

    /// Restores a secp256k1 keypair from a 32-byte secret key.
    ///
    /// # Errors
    /// Fails with [`AuthError::Adapter`] when the bytes are not a valid
    /// secp256k1 scalar.
    pub fn from_secp256k1_bytes(bytes: &[u8]) -> Result<Self, AuthError> {
        let signing_key = SigningKey::from_slice(bytes)
            .map_err(|e| AuthError::Adapter(format!("invalid secp256k1 secret key: {}", e)))?;
        Ok(KeyManager {
            material: KeyMaterial::Secp256k1 { signing_key },
        })
    }

    /// Generates a fresh Ed25519 keypair.
    ///
    /// # Errors
    /// Fails with [`AuthError::Adapter`] if the system RNG or key encoding
    /// fails (extremely unlikely).
    pub fn new_ed25519() -> Result<Self, AuthError> {
        let rng = SystemRandom::new();
        let document = Ed25519KeyPair::generate_pkcs8(&rng)
            .map_err(|_| AuthError::Adapter("ed25519 key generation failed".to_string()))?;
        let keypair = Ed25519KeyPair::from_pkcs8(document.as_ref())
            .map_err(|_| AuthError::Adapter("ed25519 key decoding failed".to_string()))?;
        Ok(KeyManager {
            material: KeyMaterial::Ed25519 { keypair },
        })
    }

    /// Raw public key bytes in the owning scheme's expected encoding.
    fn public_key_bytes(&self) -> Vec<u8> {
        match &self.material {
            KeyMaterial::Secp256k1 { signing_key } => signing_key
                .verifying_key()
                .to_encoded_point(false)
                .as_bytes()
                .to_vec(),
            KeyMaterial::Ed25519 { keypair } => keypair.public_key().as_ref().to_vec(),
        }
    }

    /// Signs `message` under the held key.
    ///
    /// # Process Flow (secp256k1)
    /// 1. Hashes the message with the EIP-191 personal-message prefix
    /// 2. Signs the digest with recoverable ECDSA
    /// 3. Serializes as 65 bytes: `r || s || v` with the Ethereum `v` offset
    ///
    /// Ed25519 signs the raw message bytes directly (64-byte signature).
    fn sign_message(&self, message: &[u8]) -> Result<Vec<u8>, AuthError> {
        match &self.material {
            KeyMaterial::Secp256k1 { signing_key } => {
                let digest = hash_personal_message(message);
                let (signature, recovery_id) = signing_key
                    .sign_prehash_recoverable(&digest)
                    .map_err(|e| AuthError::Adapter(format!("signing failed: {}", e)))?;
                let mut bytes = signature.to_vec();
                bytes.push(27 + recovery_id.to_byte());
                Ok(bytes)
            }
            KeyMaterial::Ed25519 { keypair } => Ok(keypair.sign(message).as_ref().to_vec()),
        }
    }
}

impl SignerAdapter for KeyManager {
    fn get_identity(&self) -> Result<String, AuthError> {
        self.scheme().encode_identity(&self.public_key_bytes())
    }

    fn sign<'a>(&'a self, message: &'a [u8]) -> BoxFuture<'a, Result<Vec<u8>, AuthError>> {
        Box::pin(async move { self.sign_message(message) })
    }

    fn scheme(&self) -> &'static dyn SignatureScheme {
        match &self.material {
            KeyMaterial::Secp256k1 { .. } => &ETHEREUM_SCHEME,
            KeyMaterial::Ed25519 { .. } => &ED25519_SCHEME,
        }
    }
}
