// src/wallet/scheme.rs
//! Signature scheme capability interface.
//!
//! One concrete variant exists per supported curve, selected when the
//! signing adapter is constructed. The scheme owns everything
//! curve-specific: verification, identity encoding, and the identity
//! comparison rule. Dispatch is through trait objects, never inheritance.

use ethers::types::{Address, RecoveryMessage, Signature as EthSignature};
use ethers::utils::{hex, to_checksum};
use once_cell::sync::Lazy;
use ring::signature::{UnparsedPublicKey, ED25519};

use crate::errors::AuthError;
use crate::utils::crypto::hash_data;

/// Capability interface over a public-key signature scheme.
///
/// Implementations must be pure: no state, no side effects. Verification
/// failures of any cause (bad encoding, wrong curve point, mismatched
/// signer) report `Ok(false)` rather than distinguishing why.
pub trait SignatureScheme: Send + Sync {
    /// Scheme identifier, carried in token headers as `alg`.
    fn alg(&self) -> &'static str;

    /// Encodes a raw public key into the scheme's identity string.
    ///
    /// # Errors
    /// Returns [`AuthError::Malformed`] when the key bytes are not in the
    /// scheme's expected format.
    fn encode_identity(&self, public_key: &[u8]) -> Result<String, AuthError>;

    /// Verifies `signature` over `message` against `identity`'s public key.
    fn verify(&self, message: &[u8], signature: &[u8], identity: &str) -> Result<bool, AuthError>;

    /// Compares two identities under the scheme's canonical rule.
    fn identities_match(&self, a: &str, b: &str) -> bool;
}

/// Recoverable ECDSA over secp256k1 with EIP-191 message digests.
///
/// Identities are EIP-55 checksummed Ethereum addresses. The checksum
/// casing is display-only, so identities compare case-insensitively.
pub struct EthereumScheme;

/// Ethereum scheme singleton.
pub static ETHEREUM_SCHEME: EthereumScheme = EthereumScheme;

impl SignatureScheme for EthereumScheme {
    fn alg(&self) -> &'static str {
        "ES256K-R"
    }

    /// Expects a 65-byte uncompressed SEC1 public key (`0x04` prefix).
    /// The identity is the checksummed address: the last 20 bytes of the
    /// Keccak-256 hash of the unprefixed key.
    fn encode_identity(&self, public_key: &[u8]) -> Result<String, AuthError> {
        if public_key.len() != 65 || public_key[0] != 0x04 {
            return Err(AuthError::Malformed(
                "expected a 65-byte uncompressed secp256k1 public key".to_string(),
            ));
        }
        let hash = hash_data(&public_key[1..]);
        let address = Address::from_slice(&hash[12..]);
        Ok(to_checksum(&address, None))
    }

    /// Recovers the signing address from the 65-byte `r || s || v`
    /// signature and compares it to `identity`. Recovery applies the
    /// EIP-191 prefix to `message` internally.
    fn verify(&self, message: &[u8], signature: &[u8], identity: &str) -> Result<bool, AuthError> {
        let signature = match EthSignature::try_from(signature) {
            Ok(sig) => sig,
            Err(_) => return Ok(false),
        };
        let recovered = match signature.recover(RecoveryMessage::Data(message.to_vec())) {
            Ok(address) => address,
            Err(_) => return Ok(false),
        };
        Ok(self.identities_match(&to_checksum(&recovered, None), identity))
    }

    fn identities_match(&self, a: &str, b: &str) -> bool {
        a.eq_ignore_ascii_case(b)
    }
}

/// Ed25519 signatures over raw message bytes.
///
/// Identities are the lowercase hex encoding of the 32-byte public key and
/// compare byte-for-byte (case-sensitive).
pub struct Ed25519Scheme;

/// Ed25519 scheme singleton.
pub static ED25519_SCHEME: Ed25519Scheme = Ed25519Scheme;

impl SignatureScheme for Ed25519Scheme {
    fn alg(&self) -> &'static str {
        "EdDSA"
    }

    fn encode_identity(&self, public_key: &[u8]) -> Result<String, AuthError> {
        if public_key.len() != 32 {
            return Err(AuthError::Malformed(
                "expected a 32-byte Ed25519 public key".to_string(),
            ));
        }
        Ok(hex::encode(public_key))
    }

    fn verify(&self, message: &[u8], signature: &[u8], identity: &str) -> Result<bool, AuthError> {
        let public_key = match hex::decode(identity) {
            Ok(bytes) if bytes.len() == 32 => bytes,
            _ => return Ok(false),
        };
        let verifier = UnparsedPublicKey::new(&ED25519, public_key);
        Ok(verifier.verify(message, signature).is_ok())
    }

    fn identities_match(&self, a: &str, b: &str) -> bool {
        a == b
    }
}

/// Registry of supported schemes, keyed by their `alg` identifier.
static SCHEMES: Lazy<Vec<&'static dyn SignatureScheme>> =
    Lazy::new(|| vec![&ETHEREUM_SCHEME, &ED25519_SCHEME]);

/// Looks up a scheme by its token-header identifier.
pub fn scheme_for_alg(alg: &str) -> Option<&'static dyn SignatureScheme> {
    SCHEMES.iter().copied().find(|scheme| scheme.alg() == alg)
}
