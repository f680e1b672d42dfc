// tests/login_tests.rs
//! Integration tests for the login half of the protocol: challenge
//! issuance, verification, domain binding, expiry boundaries, tamper
//! detection, and replay protection.

use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};
use futures::future::BoxFuture;

use wallet_auth::{
    AuthError, FixedClock, KeyManager, LoginIssuer, LoginOptions, LoginVerifier,
    MemoryNonceStore, SignatureScheme, SignerAdapter, ETHEREUM_SCHEME,
};

/// Adapter standing in for a wallet with no connected key.
struct DisconnectedSigner;

impl SignerAdapter for DisconnectedSigner {
    fn get_identity(&self) -> Result<String, AuthError> {
        Err(AuthError::Adapter("no connected key".to_string()))
    }

    fn sign<'a>(&'a self, _message: &'a [u8]) -> BoxFuture<'a, Result<Vec<u8>, AuthError>> {
        Box::pin(async { Err(AuthError::Adapter("no connected key".to_string())) })
    }

    fn scheme(&self) -> &'static dyn SignatureScheme {
        &ETHEREUM_SCHEME
    }
}

fn ethereum_wallet() -> Arc<KeyManager> {
    Arc::new(KeyManager::new_ethereum())
}

#[tokio::test]
async fn test_login_round_trip() {
    let wallet = ethereum_wallet();
    let identity = wallet.get_identity().unwrap();
    let issuer = LoginIssuer::new(wallet.clone());
    let verifier = LoginVerifier::new(wallet.scheme());

    let payload = issuer
        .login("example.com", &LoginOptions::default())
        .await
        .unwrap();

    assert_eq!(payload.payload.domain, "example.com");
    assert_eq!(payload.payload.address, identity);
    assert_eq!(verifier.verify("example.com", &payload).unwrap(), identity);
}

#[tokio::test]
async fn test_domain_binding() {
    let wallet = ethereum_wallet();
    let issuer = LoginIssuer::new(wallet.clone());
    let verifier = LoginVerifier::new(wallet.scheme());

    let payload = issuer
        .login("example.com", &LoginOptions::default())
        .await
        .unwrap();

    match verifier.verify("other.com", &payload) {
        Err(AuthError::DomainMismatch { expected, actual }) => {
            assert_eq!(expected, "other.com");
            assert_eq!(actual, "example.com");
        }
        other => panic!("expected DomainMismatch, got {:?}", other),
    }
}

#[tokio::test]
async fn test_expired_payload_rejected() {
    let wallet = ethereum_wallet();
    let issuer = LoginIssuer::new(wallet.clone());
    let verifier = LoginVerifier::new(wallet.scheme());

    let options = LoginOptions {
        nonce: None,
        expiration_time: Some(Utc::now() - Duration::minutes(10)),
    };
    let payload = issuer.login("example.com", &options).await.unwrap();

    assert!(matches!(
        verifier.verify("example.com", &payload),
        Err(AuthError::Expired)
    ));
}

#[tokio::test]
async fn test_expiry_boundary_is_inclusive() {
    let wallet = ethereum_wallet();
    let issue_instant = Utc.with_ymd_and_hms(2026, 8, 7, 12, 0, 0).unwrap();
    let expiry = issue_instant + Duration::minutes(5);

    let issuer =
        LoginIssuer::new(wallet.clone()).with_clock(Arc::new(FixedClock(issue_instant)));
    let options = LoginOptions {
        nonce: None,
        expiration_time: Some(expiry),
    };
    let payload = issuer.login("example.com", &options).await.unwrap();

    // A payload expiring exactly "now" still verifies
    let at_boundary =
        LoginVerifier::new(wallet.scheme()).with_clock(Arc::new(FixedClock(expiry)));
    assert!(at_boundary.verify("example.com", &payload).is_ok());

    // One second past the boundary it does not
    let past_boundary = LoginVerifier::new(wallet.scheme())
        .with_clock(Arc::new(FixedClock(expiry + Duration::seconds(1))));
    assert!(matches!(
        past_boundary.verify("example.com", &payload),
        Err(AuthError::Expired)
    ));
}

#[tokio::test]
async fn test_tampered_address_rejected() {
    let wallet = ethereum_wallet();
    let other = ethereum_wallet();
    let issuer = LoginIssuer::new(wallet.clone());
    let verifier = LoginVerifier::new(wallet.scheme());

    let mut payload = issuer
        .login("example.com", &LoginOptions::default())
        .await
        .unwrap();
    assert!(verifier.verify("example.com", &payload).is_ok());

    payload.payload.address = other.get_identity().unwrap();
    assert!(matches!(
        verifier.verify("example.com", &payload),
        Err(AuthError::InvalidSignature)
    ));
}

#[tokio::test]
async fn test_tampered_nonce_rejected() {
    let wallet = ethereum_wallet();
    let issuer = LoginIssuer::new(wallet.clone());
    let verifier = LoginVerifier::new(wallet.scheme());

    let mut payload = issuer
        .login("example.com", &LoginOptions::default())
        .await
        .unwrap();
    payload.payload.nonce = "attacker-chosen".to_string();

    assert!(matches!(
        verifier.verify("example.com", &payload),
        Err(AuthError::InvalidSignature)
    ));
}

#[tokio::test]
async fn test_garbage_signature_rejected() {
    let wallet = ethereum_wallet();
    let issuer = LoginIssuer::new(wallet.clone());
    let verifier = LoginVerifier::new(wallet.scheme());

    let mut payload = issuer
        .login("example.com", &LoginOptions::default())
        .await
        .unwrap();

    payload.signature = "zz-not-hex".to_string();
    assert!(matches!(
        verifier.verify("example.com", &payload),
        Err(AuthError::Malformed(_))
    ));

    payload.signature = "00".repeat(65);
    assert!(matches!(
        verifier.verify("example.com", &payload),
        Err(AuthError::InvalidSignature)
    ));
}

#[tokio::test]
async fn test_replay_rejected_with_nonce_store() {
    let wallet = ethereum_wallet();
    let issuer = LoginIssuer::new(wallet.clone());
    let verifier = LoginVerifier::new(wallet.scheme())
        .with_nonce_store(Arc::new(MemoryNonceStore::new()));

    let payload = issuer
        .login("example.com", &LoginOptions::default())
        .await
        .unwrap();

    assert!(verifier.verify("example.com", &payload).is_ok());
    assert!(matches!(
        verifier.verify("example.com", &payload),
        Err(AuthError::NonceAlreadyUsed)
    ));

    // A fresh login with its own nonce still passes
    let fresh = issuer
        .login("example.com", &LoginOptions::default())
        .await
        .unwrap();
    assert!(verifier.verify("example.com", &fresh).is_ok());
}

#[tokio::test]
async fn test_payload_survives_json_transport() {
    let wallet = ethereum_wallet();
    let issuer = LoginIssuer::new(wallet.clone());
    let verifier = LoginVerifier::new(wallet.scheme());

    let payload = issuer
        .login("example.com", &LoginOptions::default())
        .await
        .unwrap();

    // Client-to-server transport is JSON; verification must hold across it
    let wire = serde_json::to_string(&payload).unwrap();
    let received: wallet_auth::LoginPayload = serde_json::from_str(&wire).unwrap();
    assert_eq!(
        verifier.verify("example.com", &received).unwrap(),
        wallet.get_identity().unwrap()
    );
}

#[tokio::test]
async fn test_disconnected_adapter_fails_login() {
    let issuer = LoginIssuer::new(Arc::new(DisconnectedSigner));

    assert!(matches!(
        issuer.login("example.com", &LoginOptions::default()).await,
        Err(AuthError::Adapter(_))
    ));
}

#[tokio::test]
async fn test_empty_domain_rejected() {
    let issuer = LoginIssuer::new(ethereum_wallet());

    assert!(matches!(
        issuer.login("", &LoginOptions::default()).await,
        Err(AuthError::Malformed(_))
    ));
}

#[tokio::test]
async fn test_ed25519_login_round_trip() {
    let wallet = Arc::new(KeyManager::new_ed25519().unwrap());
    let identity = wallet.get_identity().unwrap();
    let issuer = LoginIssuer::new(wallet.clone());
    let verifier = LoginVerifier::new(wallet.scheme());

    let payload = issuer
        .login("example.com", &LoginOptions::default())
        .await
        .unwrap();

    assert_eq!(verifier.verify("example.com", &payload).unwrap(), identity);
}
