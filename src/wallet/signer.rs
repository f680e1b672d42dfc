// src/wallet/signer.rs
//! The signing adapter contract consumed by the protocol roles.

use futures::future::BoxFuture;

use crate::errors::AuthError;
use crate::wallet::scheme::SignatureScheme;

/// A thing that can sign byte messages and expose a public identity.
///
/// Supplied by the caller: a local keypair, a remote signing service, a
/// hardware wallet bridge. Each protocol operation performs at most one
/// `sign` call and treats it as an opaque asynchronous step: cancelling
/// the await aborts the enclosing operation with no side effects, since no
/// partial state has been persisted. No timeout is enforced here; callers
/// needing bounded latency impose their own around the call.
pub trait SignerAdapter: Send + Sync {
    /// Returns the signer's public identity.
    ///
    /// # Errors
    /// Fails with [`AuthError::Adapter`] when no key is connected or the
    /// identity cannot be resolved.
    fn get_identity(&self) -> Result<String, AuthError>;

    /// Signs `message` under the adapter's scheme.
    ///
    /// # Errors
    /// Fails with [`AuthError::Adapter`] when the signer refuses or fails
    /// to sign.
    fn sign<'a>(&'a self, message: &'a [u8]) -> BoxFuture<'a, Result<Vec<u8>, AuthError>>;

    /// The signature scheme this adapter signs under.
    fn scheme(&self) -> &'static dyn SignatureScheme;
}
