// src/utils/serialization.rs
//! Serialization utilities shared by the token issuer and authenticator.
//!
//! Provides:
//! - canonical JSON serialization (serde declaration order, the byte form
//!   that gets signed)
//! - URL-safe base64 encoding/decoding for the three token segments

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::AuthError;

/// Serializes a value to its canonical JSON byte form.
///
/// Serde emits struct fields in declaration order, so serializing the same
/// value always yields the same bytes, the property the token signature
/// relies on.
pub fn to_canonical_json<T: Serialize>(value: &T) -> Result<Vec<u8>, AuthError> {
    Ok(serde_json::to_vec(value)?)
}

/// Encodes a token segment as URL-safe base64 without padding.
pub fn encode_segment(bytes: &[u8]) -> String {
    base64::encode_config(bytes, base64::URL_SAFE_NO_PAD)
}

/// Decodes a URL-safe base64 token segment.
///
/// # Errors
/// Returns [`AuthError::Malformed`] when the segment is not valid base64.
pub fn decode_segment(segment: &str) -> Result<Vec<u8>, AuthError> {
    base64::decode_config(segment, base64::URL_SAFE_NO_PAD)
        .map_err(|e| AuthError::Malformed(format!("invalid base64 segment: {}", e)))
}

/// Decodes a URL-safe base64 token segment into a JSON value.
///
/// # Errors
/// Returns [`AuthError::Malformed`] when the segment is not valid base64
/// or does not parse as the expected JSON shape.
pub fn decode_json_segment<T: DeserializeOwned>(segment: &str) -> Result<T, AuthError> {
    let bytes = decode_segment(segment)?;
    serde_json::from_slice(&bytes)
        .map_err(|e| AuthError::Malformed(format!("invalid json segment: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_round_trip() {
        let bytes = b"{\"typ\":\"AUTH\"}";
        let segment = encode_segment(bytes);
        // URL-safe alphabet, no padding
        assert!(!segment.contains('='));
        assert!(!segment.contains('+'));
        assert!(!segment.contains('/'));
        assert_eq!(decode_segment(&segment).unwrap(), bytes);
    }

    #[test]
    fn test_decode_rejects_invalid_base64() {
        let err = decode_segment("not base64!!").unwrap_err();
        assert!(matches!(err, AuthError::Malformed(_)));
    }

    #[test]
    fn test_decode_json_rejects_wrong_shape() {
        let segment = encode_segment(b"[1,2,3]");
        let err = decode_json_segment::<crate::models::claims::TokenHeader>(&segment).unwrap_err();
        assert!(matches!(err, AuthError::Malformed(_)));
    }
}
