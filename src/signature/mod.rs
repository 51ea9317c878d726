//! Signature capability used by the ledger
//!
//! The wallet never touches key material directly: it hands canonical token
//! bytes to a `SignatureProvider`. Verification reports a bad or malformed
//! signature as `Ok(false)`; only unusable key material is an error.

pub mod ed25519;

use blake2::{Blake2b512, Digest};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::Result;

pub use ed25519::{Ed25519Provider, Keypair, PublicKeyBytes};

/// Opaque signature bytes
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature(pub Vec<u8>);

impl Signature {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Get signature as hex string
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    /// Create signature from hex string (any length; checked at verification)
    pub fn from_hex(hex_str: &str) -> std::result::Result<Self, hex::FromHexError> {
        hex::decode(hex_str).map(Signature)
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hex = self.to_hex();
        write!(f, "Signature({}...)", &hex[..hex.len().min(16)])
    }
}

/// Asymmetric sign/verify over byte strings
pub trait SignatureProvider {
    type SigningKey;
    type VerifyingKey: Clone + AsRef<[u8]>;

    /// Derive the verifying key for a signing key
    fn public_key(&self, key: &Self::SigningKey) -> Self::VerifyingKey;

    /// Sign `message`
    fn sign(&self, key: &Self::SigningKey, message: &[u8]) -> Result<Signature>;

    /// Verify `signature` over `message`.
    ///
    /// Returns `Ok(false)` for any signature that does not verify, including
    /// malformed encodings. Errors are reserved for malformed key material.
    fn verify(
        &self,
        key: &Self::VerifyingKey,
        message: &[u8],
        signature: &Signature,
    ) -> Result<bool>;
}

/// Short Blake2b fingerprint of a public key, safe to log
pub fn key_fingerprint(public_key: &[u8]) -> String {
    let mut hasher = Blake2b512::new();
    hasher.update(public_key);
    let result = hasher.finalize();
    hex::encode(&result[..8])
}
