//! Offline value-transfer cryptography
//!
//! Hash-based primitives and a signed-token wallet for moving value between
//! parties without a live ledger:
//! - `HashCommitment`: hiding/binding commitment to an opaque value
//! - `ChameleonHash`: trapdoor hash whose holder can find second preimages
//! - `Wallet`: mints, signs, transfers, and verifies value-bearing tokens

pub mod cli;
pub mod crypto;
pub mod error;
pub mod ledger;
pub mod signature;
pub mod types;

// Re-export commonly used types
pub use crypto::{ChameleonHash, Commitment, CommitmentOpening, HashCommitment, Trapdoor};
pub use error::{LedgerError, Result};
pub use ledger::{Token, Wallet, WalletSnapshot};
pub use signature::{Ed25519Provider, Keypair, PublicKeyBytes, Signature, SignatureProvider};
pub use types::{Blinding, Digest32, TokenId};
