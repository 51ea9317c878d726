//! Trapdoor ("chameleon") hash
//!
//! The trapdoor keys a pseudorandom pad `P(m) = SHA-256(trapdoor || m)` and the
//! digest is `P(message) XOR blinding`. Without the trapdoor `P` cannot be
//! evaluated, so nobody else can steer a blinding onto a target digest. With it,
//! `P(m) XOR r XOR P(m')` is a blinding that opens the same digest to `m'`.
//!
//! Empty messages are valid and hash the empty byte string.

use crate::types::{Blinding, Digest32, DIGEST_LEN};

use super::types::Trapdoor;
use super::{digests_equal, sha256};

fn xor(a: &[u8; DIGEST_LEN], b: &[u8; DIGEST_LEN]) -> [u8; DIGEST_LEN] {
    let mut out = [0u8; DIGEST_LEN];
    for (o, (x, y)) in out.iter_mut().zip(a.iter().zip(b.iter())) {
        *o = x ^ y;
    }
    out
}

/// Chameleon hash instance; exclusively owns its trapdoor
#[derive(Debug, Clone)]
pub struct ChameleonHash {
    trapdoor: Trapdoor,
}

impl ChameleonHash {
    /// Create an instance with a freshly generated 256-bit trapdoor
    pub fn new() -> Self {
        Self::with_trapdoor(Trapdoor::random())
    }

    /// Create an instance around an existing trapdoor
    pub fn with_trapdoor(trapdoor: Trapdoor) -> Self {
        Self { trapdoor }
    }

    fn pad(&self, message: &[u8]) -> [u8; DIGEST_LEN] {
        sha256(&[&self.trapdoor.as_bytes()[..], message])
    }

    /// Hash `message`, drawing a fresh blinding when none is supplied
    pub fn hash(&self, message: &[u8], blinding: Option<Blinding>) -> (Digest32, Blinding) {
        let blinding = blinding.unwrap_or_else(Blinding::random);
        let digest = Digest32(xor(&self.pad(message), blinding.as_bytes()));
        (digest, blinding)
    }

    /// Find the blinding that opens the original digest to `new_message`
    pub fn modify(
        &self,
        original_message: &[u8],
        original_blinding: &Blinding,
        new_message: &[u8],
    ) -> Blinding {
        let digest = xor(&self.pad(original_message), original_blinding.as_bytes());
        Blinding(xor(&digest, &self.pad(new_message)))
    }

    /// Check that `(message, blinding)` opens `digest` (constant time)
    pub fn verify(&self, message: &[u8], blinding: &Blinding, digest: &Digest32) -> bool {
        let (computed, _) = self.hash(message, Some(*blinding));
        digests_equal(&computed, digest)
    }
}

impl Default for ChameleonHash {
    fn default() -> Self {
        Self::new()
    }
}
