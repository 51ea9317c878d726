//! Ed25519 signature provider backed by ed25519-dalek

use ed25519_dalek::{Signer, SigningKey, Verifier, VerifyingKey};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{LedgerError, Result};

use super::{key_fingerprint, Signature, SignatureProvider};

/// Raw 32-byte Ed25519 public key.
///
/// Kept as bytes so that malformed key material can be represented and
/// reported at verification time.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PublicKeyBytes(pub [u8; 32]);

impl PublicKeyBytes {
    /// Get public key as hex string
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from hex string
    pub fn from_hex(s: &str) -> std::result::Result<Self, hex::FromHexError> {
        let bytes = hex::decode(s)?;
        if bytes.len() != 32 {
            return Err(hex::FromHexError::InvalidStringLength);
        }
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }
}

impl fmt::Debug for PublicKeyBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ed25519Pub({})", key_fingerprint(&self.0))
    }
}

impl AsRef<[u8]> for PublicKeyBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Ed25519 keypair
#[derive(Clone)]
pub struct Keypair {
    signing_key: SigningKey,
}

impl Keypair {
    /// Generate a new random keypair
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        Self {
            signing_key: SigningKey::generate(&mut rng),
        }
    }

    /// Create from a 32-byte seed
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(seed),
        }
    }

    /// Get the public key
    pub fn public_key(&self) -> PublicKeyBytes {
        PublicKeyBytes(self.signing_key.verifying_key().to_bytes())
    }
}

impl fmt::Debug for Keypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Keypair({:?})", self.public_key())
    }
}

/// EdDSA over Curve25519
#[derive(Clone, Copy, Debug, Default)]
pub struct Ed25519Provider;

impl SignatureProvider for Ed25519Provider {
    type SigningKey = Keypair;
    type VerifyingKey = PublicKeyBytes;

    fn public_key(&self, key: &Keypair) -> PublicKeyBytes {
        key.public_key()
    }

    fn sign(&self, key: &Keypair, message: &[u8]) -> Result<Signature> {
        let sig = key.signing_key.sign(message);
        Ok(Signature(sig.to_bytes().to_vec()))
    }

    fn verify(
        &self,
        key: &PublicKeyBytes,
        message: &[u8],
        signature: &Signature,
    ) -> Result<bool> {
        let verifying_key =
            VerifyingKey::from_bytes(&key.0).map_err(|_| LedgerError::InvalidPublicKey)?;

        let sig = match ed25519_dalek::Signature::from_slice(signature.as_bytes()) {
            Ok(sig) => sig,
            Err(_) => {
                tracing::debug!(len = signature.as_bytes().len(), "malformed ed25519 signature");
                return Ok(false);
            }
        };

        Ok(verifying_key.verify(message, &sig).is_ok())
    }
}
