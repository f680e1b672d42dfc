// src/storage/nonce_store.rs
//! Replay protection for login nonces.
//!
//! The login verifier is otherwise stateless, so single-use nonce
//! enforcement lives behind an external collaborator. This module defines
//! the store contract and an in-memory implementation; deployments with
//! multiple verifier instances substitute a shared store behind the same
//! trait.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};

use crate::errors::AuthError;
use crate::utils::clock::{Clock, SystemClock};

/// Store of consumed login nonces, keyed by `(domain, nonce)`.
pub trait NonceStore: Send + Sync {
    /// Atomically records `(domain, nonce)` if unseen.
    ///
    /// Returns `true` when the pair was newly recorded and `false` when it
    /// was already consumed. `expires_at` bounds the retention window: once
    /// the challenge itself has expired the verifier rejects it on time
    /// alone, so entries past expiry may be dropped.
    fn consume(
        &self,
        domain: &str,
        nonce: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<bool, AuthError>;
}

/// In-memory nonce store.
///
/// This store provides:
/// - Thread-safe consumption via an internal mutex
/// - O(1) average case complexity for lookups and insertions
/// - Automatic pruning of entries whose challenge has expired
pub struct MemoryNonceStore {
    /// Time source used for pruning expired entries
    clock: Arc<dyn Clock>,
    /// Consumed nonces mapped to their challenge expiry
    seen: Mutex<HashMap<(String, String), DateTime<Utc>>>,
}

impl MemoryNonceStore {
    /// Creates an empty store backed by the system clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Creates an empty store with an injected time source.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        MemoryNonceStore {
            clock,
            seen: Mutex::new(HashMap::new()),
        }
    }

    /// Number of live (unexpired) entries currently retained.
    pub fn len(&self) -> usize {
        self.seen.lock().unwrap().len()
    }

    /// Whether the store currently retains no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemoryNonceStore {
    fn default() -> Self {
        Self::new()
    }
}

impl NonceStore for MemoryNonceStore {
    fn consume(
        &self,
        domain: &str,
        nonce: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<bool, AuthError> {
        let now = self.clock.now();
        let mut seen = self.seen.lock().unwrap();

        // Drop entries whose challenge can no longer pass the expiry check
        seen.retain(|_, expiry| *expiry >= now);

        match seen.entry((domain.to_string(), nonce.to_string())) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(slot) => {
                slot.insert(expires_at);
                Ok(true)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use std::sync::Mutex as StdMutex;

    /// Clock whose instant can be advanced by tests.
    struct SteppingClock(StdMutex<DateTime<Utc>>);

    impl SteppingClock {
        fn new(start: DateTime<Utc>) -> Arc<Self> {
            Arc::new(SteppingClock(StdMutex::new(start)))
        }

        fn advance(&self, by: Duration) {
            let mut now = self.0.lock().unwrap();
            *now = *now + by;
        }
    }

    impl Clock for SteppingClock {
        fn now(&self) -> DateTime<Utc> {
            *self.0.lock().unwrap()
        }
    }

    #[test]
    fn test_first_consume_succeeds_second_fails() {
        let store = MemoryNonceStore::new();
        let expiry = Utc::now() + Duration::minutes(5);

        assert!(store.consume("example.com", "nonce-1", expiry).unwrap());
        assert!(!store.consume("example.com", "nonce-1", expiry).unwrap());
    }

    #[test]
    fn test_nonces_are_scoped_per_domain() {
        let store = MemoryNonceStore::new();
        let expiry = Utc::now() + Duration::minutes(5);

        assert!(store.consume("example.com", "nonce-1", expiry).unwrap());
        assert!(store.consume("other.com", "nonce-1", expiry).unwrap());
    }

    #[test]
    fn test_expired_entries_are_pruned() {
        let start = Utc::now();
        let clock = SteppingClock::new(start);
        let store = MemoryNonceStore::with_clock(clock.clone());

        assert!(store
            .consume("example.com", "nonce-1", start + Duration::minutes(5))
            .unwrap());
        assert_eq!(store.len(), 1);

        // Past the challenge expiry the entry is dropped; the expiry check
        // in the verifier is what rejects the stale payload from here on
        clock.advance(Duration::minutes(10));
        assert!(store
            .consume("example.com", "nonce-2", clock.now() + Duration::minutes(5))
            .unwrap());
        assert_eq!(store.len(), 1);
    }
}
