// src/utils/crypto.rs
//! Cryptographic hashing utilities for the Ethereum signature scheme.
//!
//! Uses Keccak-256 (Ethereum's standard hash function) for all operations.

use ethers::utils::{hash_message, keccak256};

/// Computes a Keccak-256 hash of the input data (Ethereum-compatible).
///
/// # Arguments
/// * `data` - Binary data to hash (as bytes slice)
///
/// # Returns
/// Fixed-size 32-byte array (`[u8; 32]`) containing the hash.
pub fn hash_data(data: &[u8]) -> [u8; 32] {
    keccak256(data)
}

/// Computes the EIP-191 personal-message digest of `message`.
///
/// Ethereum wallets never sign raw bytes: the message is prefixed with
/// `"\x19Ethereum Signed Message:\n"` and its decimal length before
/// hashing. The Ethereum scheme signs and recovers against this digest.
///
/// # Arguments
/// * `message` - The raw message bytes presented to the wallet
///
/// # Returns
/// The 32-byte Keccak-256 digest of the prefixed message.
pub fn hash_personal_message(message: &[u8]) -> [u8; 32] {
    hash_message(message).0
}
