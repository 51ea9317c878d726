//! Hiding/binding hash commitments
//!
//! `digest = SHA-256(value || blinding)` with a 256-bit random blinding.
//! Binding rests on SHA-256 collision resistance, hiding on the blinding's entropy.
//! The blinding is fixed-length and trails the value, so the encoding is injective.

use crate::types::{Blinding, Digest32};

use super::types::{Commitment, CommitmentOpening};
use super::{digests_equal, sha256};

/// Single-use hash commitment scheme
#[derive(Clone, Copy, Debug, Default)]
pub struct HashCommitment;

impl HashCommitment {
    pub fn new() -> Self {
        HashCommitment
    }

    /// Commit to `value` under a fresh random blinding
    pub fn commit(&self, value: &[u8]) -> (Digest32, Blinding) {
        let blinding = Blinding::random();
        (self.commit_with_blinding(value, &blinding), blinding)
    }

    /// Deterministic commitment under a caller-chosen blinding
    pub fn commit_with_blinding(&self, value: &[u8], blinding: &Blinding) -> Digest32 {
        Digest32(sha256(&[value, &blinding.as_bytes()[..]]))
    }

    /// Check an opening against a digest in constant time
    pub fn verify(&self, value: &[u8], blinding: &Blinding, digest: &Digest32) -> bool {
        let computed = self.commit_with_blinding(value, blinding);
        digests_equal(&computed, digest)
    }

    /// Commit and split the result into its public and secret halves
    pub fn commit_opening(&self, value: &[u8]) -> (Commitment, CommitmentOpening) {
        let (digest, blinding) = self.commit(value);
        (
            Commitment { digest },
            CommitmentOpening {
                value: value.to_vec(),
                blinding,
            },
        )
    }

    /// Verify a revealed opening
    pub fn verify_opening(&self, commitment: &Commitment, opening: &CommitmentOpening) -> bool {
        self.verify(&opening.value, &opening.blinding, &commitment.digest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commitment_verification() {
        let scheme = HashCommitment::new();
        let (digest, blinding) = scheme.commit(b"10000");

        assert!(scheme.verify(b"10000", &blinding, &digest));
    }

    #[test]
    fn test_commitment_verification_fails_wrong_value() {
        let scheme = HashCommitment::new();
        let (digest, blinding) = scheme.commit(b"10000");

        assert!(!scheme.verify(b"8000", &blinding, &digest));
    }

    #[test]
    fn test_commitment_verification_fails_wrong_blinding() {
        let scheme = HashCommitment::new();
        let (digest, _) = scheme.commit(b"10000");

        assert!(!scheme.verify(b"10000", &Blinding::random(), &digest));
    }

    #[test]
    fn test_commitment_hash_deterministic() {
        let scheme = HashCommitment::new();
        let blinding = Blinding([42u8; 32]);

        let digest1 = scheme.commit_with_blinding(b"12345", &blinding);
        let digest2 = scheme.commit_with_blinding(b"12345", &blinding);

        assert_eq!(digest1, digest2);
    }

    #[test]
    fn test_commitment_is_sha256_of_value_then_blinding() {
        let scheme = HashCommitment::new();
        let blinding = Blinding([0u8; 32]);

        let mut preimage = b"abc".to_vec();
        preimage.extend_from_slice(&[0u8; 32]);

        assert_eq!(
            scheme.commit_with_blinding(b"abc", &blinding),
            Digest32(sha256(&[preimage.as_slice()]))
        );
    }

    #[test]
    fn test_commitment_hiding() {
        let scheme = HashCommitment::new();
        let (digest1, blinding1) = scheme.commit(b"same value");
        let (digest2, blinding2) = scheme.commit(b"same value");

        assert_ne!(blinding1, blinding2);
        assert_ne!(digest1, digest2);
    }

    #[test]
    fn test_empty_value_commitment() {
        let scheme = HashCommitment::new();
        let (digest, blinding) = scheme.commit(b"");

        assert!(scheme.verify(b"", &blinding, &digest));
        assert!(!scheme.verify(b"\0", &blinding, &digest));
    }

    #[test]
    fn test_opening_roundtrip() {
        let scheme = HashCommitment::new();
        let (commitment, opening) = scheme.commit_opening(b"sealed bid: 42");

        assert!(scheme.verify_opening(&commitment, &opening));

        let forged = CommitmentOpening {
            value: b"sealed bid: 41".to_vec(),
            ..opening
        };
        assert!(!scheme.verify_opening(&commitment, &forged));
    }
}
