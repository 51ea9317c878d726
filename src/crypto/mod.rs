//! Hash-based commitment primitives
//!
//! Both primitives hash a message together with a 256-bit blinding value:
//! - `HashCommitment`: hiding/binding commitment, `SHA-256(value || blinding)`
//! - `ChameleonHash`: trapdoor hash whose holder can open a digest to any message

pub mod chameleon;
pub mod commitment;
pub mod types;

use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use crate::types::{Digest32, DIGEST_LEN};

pub use chameleon::ChameleonHash;
pub use commitment::HashCommitment;
pub use types::{Commitment, CommitmentOpening, Trapdoor};

/// SHA-256 over the concatenation of `parts`
pub(crate) fn sha256(parts: &[&[u8]]) -> [u8; DIGEST_LEN] {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().into()
}

/// Constant-time digest equality
pub fn digests_equal(a: &Digest32, b: &Digest32) -> bool {
    bool::from(a.as_bytes()[..].ct_eq(&b.as_bytes()[..]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_concatenates_parts() {
        assert_eq!(sha256(&[&b"ab"[..], &b"cd"[..]]), sha256(&[&b"abcd"[..]]));
        assert_eq!(sha256(&[&b"abcd"[..], &b""[..]]), sha256(&[&b"abcd"[..]]));
    }

    #[test]
    fn test_sha256_known_vector() {
        assert_eq!(
            hex::encode(sha256(&[&b"abc"[..]])),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_digests_equal() {
        let a = Digest32([1u8; 32]);
        let mut other = [1u8; 32];
        assert!(digests_equal(&a, &Digest32(other)));
        other[31] = 2;
        assert!(!digests_equal(&a, &Digest32(other)));
    }
}
