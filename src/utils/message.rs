// src/utils/message.rs
//! Canonical rendering of login challenges.
//!
//! Both signing and verification operate on the exact bytes produced here:
//! the wallet signs the rendered message, and the verifier re-renders the
//! received challenge to reproduce the signed bytes.

use chrono::SecondsFormat;

use crate::models::challenge::LoginChallenge;

/// Fixed anti-phishing reminder embedded in every login message.
/// Not user-configurable.
const DOMAIN_WARNING: &str =
    "Make sure that the requesting domain above matches the URL of the current website.";

/// Renders a challenge to the exact byte sequence that gets signed.
///
/// Each field sits on a fixed labeled line in a fixed order, so no two
/// distinct challenges occurring in the protocol render identically. The
/// expiration is rendered as ISO-8601 with millisecond precision in UTC.
/// Pure and infallible for any structurally valid challenge.
pub fn canonicalize(challenge: &LoginChallenge) -> Vec<u8> {
    let expiration = challenge
        .expiration_time
        .to_rfc3339_opts(SecondsFormat::Millis, true);

    format!(
        "{domain} wants you to sign in with your account:\n\
         {address}\n\
         \n\
         {warning}\n\
         \n\
         Nonce: {nonce}\n\
         Expiration Time: {expiration}",
        domain = challenge.domain,
        address = challenge.address,
        warning = DOMAIN_WARNING,
        nonce = challenge.nonce,
        expiration = expiration,
    )
    .into_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn fixed_challenge(nonce: &str) -> LoginChallenge {
        LoginChallenge {
            domain: "example.com".to_string(),
            address: "0xABC".to_string(),
            nonce: nonce.to_string(),
            expiration_time: Utc.with_ymd_and_hms(2026, 8, 7, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_exact_rendering() {
        let message = canonicalize(&fixed_challenge("nonce-1"));
        let expected = "example.com wants you to sign in with your account:\n\
                        0xABC\n\
                        \n\
                        Make sure that the requesting domain above matches the URL of the current website.\n\
                        \n\
                        Nonce: nonce-1\n\
                        Expiration Time: 2026-08-07T12:00:00.000Z";
        assert_eq!(String::from_utf8(message).unwrap(), expected);
    }

    #[test]
    fn test_distinct_challenges_render_distinct_bytes() {
        let a = canonicalize(&fixed_challenge("nonce-1"));
        let b = canonicalize(&fixed_challenge("nonce-2"));
        assert_ne!(a, b);

        let mut other_domain = fixed_challenge("nonce-1");
        other_domain.domain = "other.com".to_string();
        assert_ne!(a, canonicalize(&other_domain));
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let challenge = fixed_challenge("nonce-1");
        assert_eq!(canonicalize(&challenge), canonicalize(&challenge));
    }
}
