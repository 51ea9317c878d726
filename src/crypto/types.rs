//! Cryptographic types for commitments and chameleon hashing

use crate::types::{random_bytes, Blinding, Digest32, BLINDING_LEN};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Secret that lets its holder find second preimages of a chameleon digest.
///
/// Deliberately not `Serialize`: a trapdoor never leaves the instance that owns it.
#[derive(Clone, PartialEq, Eq)]
pub struct Trapdoor([u8; BLINDING_LEN]);

impl Trapdoor {
    /// Generate a fresh 256-bit trapdoor
    pub fn random() -> Self {
        Trapdoor(random_bytes())
    }

    /// Create trapdoor from bytes
    pub fn from_bytes(bytes: [u8; BLINDING_LEN]) -> Self {
        Trapdoor(bytes)
    }

    /// Create trapdoor from hex string
    pub fn from_hex(hex_str: &str) -> Result<Self, hex::FromHexError> {
        let bytes = hex::decode(hex_str)?;
        if bytes.len() != BLINDING_LEN {
            return Err(hex::FromHexError::InvalidStringLength);
        }
        let mut trapdoor = [0u8; BLINDING_LEN];
        trapdoor.copy_from_slice(&bytes);
        Ok(Trapdoor(trapdoor))
    }

    pub(crate) fn as_bytes(&self) -> &[u8; BLINDING_LEN] {
        &self.0
    }
}

impl fmt::Debug for Trapdoor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Trapdoor(<redacted>)")
    }
}

/// Public half of a hash commitment
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commitment {
    /// SHA-256(value || blinding)
    pub digest: Digest32,
}

/// Commitment opening reveals the committed value
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitmentOpening {
    /// Committed value (opaque bytes)
    pub value: Vec<u8>,
    /// Random blinding used in the commitment
    pub blinding: Blinding,
}
