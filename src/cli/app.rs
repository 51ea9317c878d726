//! Command execution for the offline-crypto CLI

use serde::Serialize;

use crate::crypto::{ChameleonHash, HashCommitment, Trapdoor};
use crate::error::Result;
use crate::ledger::{Wallet, WalletSnapshot};
use crate::signature::Keypair;
use crate::types::{Blinding, Digest32};

use super::commands::{ChameleonAction, Commands, CommitAction, DemoAction};

/// Output of `chameleon hash`
#[derive(Debug, Serialize)]
pub struct ChameleonReport {
    pub message: String,
    pub digest: String,
    pub blinding: String,
}

/// Output of `chameleon collide`
#[derive(Debug, Serialize)]
pub struct CollisionReport {
    pub digest: String,
    pub original: ChameleonReport,
    pub modified: ChameleonReport,
    pub verified: bool,
}

/// Output of `commit create`
#[derive(Debug, Serialize)]
pub struct CommitReport {
    pub digest: String,
    pub blinding: String,
}

/// Output of `demo transfer`
#[derive(Debug, Serialize)]
pub struct TransferReport {
    pub token_id: String,
    pub signature_valid: bool,
    pub foreign_key_rejected: bool,
    pub sender: WalletSnapshot,
    pub recipient: WalletSnapshot,
}

fn chameleon_for(trapdoor: Option<&str>) -> Result<ChameleonHash> {
    Ok(match trapdoor {
        Some(hex_str) => ChameleonHash::with_trapdoor(Trapdoor::from_hex(hex_str)?),
        None => ChameleonHash::new(),
    })
}

/// Hash `message` under the given (or a fresh) trapdoor
pub fn chameleon_hash(
    message: &str,
    trapdoor: Option<&str>,
    blinding: Option<&str>,
) -> Result<ChameleonReport> {
    let ch = chameleon_for(trapdoor)?;
    let blinding = blinding.map(Blinding::from_hex).transpose()?;
    let (digest, blinding) = ch.hash(message.as_bytes(), blinding);

    Ok(ChameleonReport {
        message: message.to_string(),
        digest: digest.to_hex(),
        blinding: blinding.to_hex(),
    })
}

/// Hash `message`, then compute the blinding that opens the digest to `new_message`
pub fn chameleon_collide(
    message: &str,
    new_message: &str,
    trapdoor: Option<&str>,
) -> Result<CollisionReport> {
    let ch = chameleon_for(trapdoor)?;
    let (digest, blinding) = ch.hash(message.as_bytes(), None);
    let new_blinding = ch.modify(message.as_bytes(), &blinding, new_message.as_bytes());
    let (new_digest, _) = ch.hash(new_message.as_bytes(), Some(new_blinding));

    Ok(CollisionReport {
        digest: digest.to_hex(),
        verified: ch.verify(new_message.as_bytes(), &new_blinding, &digest),
        original: ChameleonReport {
            message: message.to_string(),
            digest: digest.to_hex(),
            blinding: blinding.to_hex(),
        },
        modified: ChameleonReport {
            message: new_message.to_string(),
            digest: new_digest.to_hex(),
            blinding: new_blinding.to_hex(),
        },
    })
}

/// Commit to `value` under a fresh blinding
pub fn commit_create(value: &str) -> CommitReport {
    let (digest, blinding) = HashCommitment::new().commit(value.as_bytes());
    CommitReport {
        digest: digest.to_hex(),
        blinding: blinding.to_hex(),
    }
}

/// Check a hex-encoded opening
pub fn commit_verify(value: &str, blinding: &str, digest: &str) -> Result<bool> {
    let blinding = Blinding::from_hex(blinding)?;
    let digest = Digest32::from_hex(digest)?;
    Ok(HashCommitment::new().verify(value.as_bytes(), &blinding, &digest))
}

/// Mint, sign, verify, and transfer one token between two fresh wallets
pub fn demo_transfer(amount: i64, from: &str, to: &str) -> Result<TransferReport> {
    let sender = Wallet::new(from);
    let recipient = Wallet::new(to);
    let sender_key = Keypair::generate();
    let foreign_key = Keypair::generate();

    let token = sender.create_token(amount)?;
    tracing::info!("{} minted token {} worth {}", from, token.id(), token.value());

    let signature = sender.sign_token(&sender_key, &token)?;
    let signature_valid = sender.verify_token(&sender_key.public_key(), &token, &signature)?;
    let foreign_key_rejected =
        !sender.verify_token(&foreign_key.public_key(), &token, &signature)?;

    sender.transfer_token(&recipient, &token.id(), &sender_key)?;
    sender.audit()?;
    recipient.audit()?;

    Ok(TransferReport {
        token_id: token.id().to_hex(),
        signature_valid,
        foreign_key_rejected,
        sender: sender.snapshot(),
        recipient: recipient.snapshot(),
    })
}

/// Run a parsed command and return its JSON report
pub fn execute(command: Commands) -> Result<serde_json::Value> {
    let report = match command {
        Commands::Chameleon { action } => match action {
            ChameleonAction::Hash {
                message,
                trapdoor,
                blinding,
            } => serde_json::to_value(chameleon_hash(
                &message,
                trapdoor.as_deref(),
                blinding.as_deref(),
            )?)?,
            ChameleonAction::Collide {
                message,
                new_message,
                trapdoor,
            } => serde_json::to_value(chameleon_collide(
                &message,
                &new_message,
                trapdoor.as_deref(),
            )?)?,
        },

        Commands::Commit { action } => match action {
            CommitAction::Create { value } => serde_json::to_value(commit_create(&value))?,
            CommitAction::Verify {
                value,
                blinding,
                digest,
            } => serde_json::json!({ "valid": commit_verify(&value, &blinding, &digest)? }),
        },

        Commands::Demo { action } => match action {
            DemoAction::Transfer { amount, from, to } => {
                serde_json::to_value(demo_transfer(amount, &from, &to)?)?
            }
        },
    };

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LedgerError;

    #[test]
    fn test_chameleon_hash_with_fixed_inputs() {
        let trapdoor = "ab".repeat(32);
        let blinding = "cd".repeat(32);

        let r1 = chameleon_hash("hello", Some(&trapdoor), Some(&blinding)).unwrap();
        let r2 = chameleon_hash("hello", Some(&trapdoor), Some(&blinding)).unwrap();

        assert_eq!(r1.digest, r2.digest);
        assert_eq!(r1.blinding, blinding);
    }

    #[test]
    fn test_chameleon_hash_bad_trapdoor() {
        let result = chameleon_hash("hello", Some("abc"), None);
        assert!(matches!(result, Err(LedgerError::HexDecode(_))));
    }

    #[test]
    fn test_chameleon_collide() {
        let report = chameleon_collide("first", "second", None).unwrap();

        assert!(report.verified);
        assert_eq!(report.original.digest, report.modified.digest);
        assert_ne!(report.original.blinding, report.modified.blinding);
    }

    #[test]
    fn test_commit_create_and_verify() {
        let report = commit_create("42");

        assert!(commit_verify("42", &report.blinding, &report.digest).unwrap());
        assert!(!commit_verify("43", &report.blinding, &report.digest).unwrap());
    }

    #[test]
    fn test_demo_transfer() {
        let report = demo_transfer(100, "A", "B").unwrap();

        assert!(report.signature_valid);
        assert!(report.foreign_key_rejected);
        assert_eq!(report.sender.balance, 0);
        assert_eq!(report.recipient.balance, 100);
        assert_eq!(report.recipient.tokens[0].owner(), "B");
    }

    #[test]
    fn test_demo_transfer_negative_amount() {
        let result = demo_transfer(-10, "A", "B");
        assert!(matches!(result, Err(LedgerError::InvalidAmount(-10))));
    }

    #[test]
    fn test_execute_commit_verify() {
        let created = commit_create("v");
        let value = execute(Commands::Commit {
            action: CommitAction::Verify {
                value: "v".to_string(),
                blinding: created.blinding,
                digest: created.digest,
            },
        })
        .unwrap();

        assert_eq!(value["valid"], serde_json::Value::Bool(true));
    }
}
