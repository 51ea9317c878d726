//! Core types shared by the hash primitives and the ledger

use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Output length of every digest produced by this crate (SHA-256)
pub const DIGEST_LEN: usize = 32;

/// Length of blinding values and trapdoors
pub const BLINDING_LEN: usize = 32;

/// Length of token identifiers (128 bits)
pub const TOKEN_ID_LEN: usize = 16;

fn decode_fixed<const N: usize>(hex_str: &str) -> Result<[u8; N], hex::FromHexError> {
    let bytes = hex::decode(hex_str)?;
    if bytes.len() != N {
        return Err(hex::FromHexError::InvalidStringLength);
    }
    let mut out = [0u8; N];
    out.copy_from_slice(&bytes);
    Ok(out)
}

/// Fill a fixed-size array from the thread-local CSPRNG
pub(crate) fn random_bytes<const N: usize>() -> [u8; N] {
    let mut bytes = [0u8; N];
    rand::thread_rng().fill_bytes(&mut bytes);
    bytes
}

/// 256-bit digest of a chameleon hash or commitment
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Digest32(pub [u8; DIGEST_LEN]);

impl Digest32 {
    /// Wrap raw digest bytes
    pub const fn from_bytes(bytes: [u8; DIGEST_LEN]) -> Self {
        Digest32(bytes)
    }

    /// Get the raw bytes
    pub const fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }

    /// Get digest as hex string
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Create digest from hex string
    pub fn from_hex(hex_str: &str) -> Result<Self, hex::FromHexError> {
        decode_fixed(hex_str).map(Digest32)
    }
}

impl fmt::Display for Digest32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// Random blinding value mixed into a chameleon hash or commitment
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blinding(pub [u8; BLINDING_LEN]);

impl Blinding {
    /// Generate a fresh 256-bit blinding value
    pub fn random() -> Self {
        Blinding(random_bytes())
    }

    /// Get the raw bytes
    pub const fn as_bytes(&self) -> &[u8; BLINDING_LEN] {
        &self.0
    }

    /// Get blinding as hex string
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Create blinding from hex string
    pub fn from_hex(hex_str: &str) -> Result<Self, hex::FromHexError> {
        decode_fixed(hex_str).map(Blinding)
    }
}

impl From<[u8; BLINDING_LEN]> for Blinding {
    fn from(bytes: [u8; BLINDING_LEN]) -> Self {
        Blinding(bytes)
    }
}

/// Unique 128-bit token identifier
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TokenId(pub [u8; TOKEN_ID_LEN]);

impl TokenId {
    /// Generate a random identifier from the thread-local CSPRNG
    pub fn random() -> Self {
        TokenId(random_bytes())
    }

    /// Create an identifier from raw bytes
    pub const fn from_bytes(bytes: [u8; TOKEN_ID_LEN]) -> Self {
        TokenId(bytes)
    }

    /// Get identifier as lowercase hex string (32 chars)
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Create identifier from hex string
    pub fn from_hex(hex_str: &str) -> Result<Self, hex::FromHexError> {
        decode_fixed(hex_str).map(TokenId)
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_id_uniqueness() {
        let id1 = TokenId::random();
        let id2 = TokenId::random();
        assert_ne!(id1, id2);
        assert_eq!(id1.to_hex().len(), 32);
    }

    #[test]
    fn test_blinding_random() {
        let b1 = Blinding::random();
        let b2 = Blinding::random();
        assert_ne!(b1, b2);
    }

    #[test]
    fn test_digest_hex_conversion() {
        let digest = Digest32([7u8; 32]);
        let hex = digest.to_hex();
        assert_eq!(Digest32::from_hex(&hex).unwrap(), digest);
    }

    #[test]
    fn test_from_hex_rejects_wrong_length() {
        assert!(matches!(
            Digest32::from_hex("abcd"),
            Err(hex::FromHexError::InvalidStringLength)
        ));
        assert!(TokenId::from_hex(&"00".repeat(32)).is_err());
        assert!(Blinding::from_hex("not hex").is_err());
    }

    #[test]
    fn test_serialization() {
        let id = TokenId::random();
        let serialized = serde_json::to_string(&id).unwrap();
        let deserialized: TokenId = serde_json::from_str(&serialized).unwrap();
        assert_eq!(id, deserialized);
    }
}
