//! Property tests for the hash primitives and the ledger invariant

use std::collections::HashSet;

use offline_crypto::{
    Blinding, ChameleonHash, HashCommitment, Keypair, LedgerError, Trapdoor, Wallet,
};
use proptest::prelude::*;

fn message(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..=max_len)
}

#[derive(Debug, Clone)]
enum Op {
    Mint { wallet: usize, value: i64 },
    Transfer { from: usize, to: usize, pick: usize },
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0usize..3, -5i64..1_000).prop_map(|(wallet, value)| Op::Mint { wallet, value }),
        (0usize..3, 0usize..3, any::<usize>())
            .prop_map(|(from, to, pick)| Op::Transfer { from, to, pick }),
    ]
}

proptest! {
    #[test]
    fn prop_chameleon_modify_preserves_digest(
        trapdoor in any::<[u8; 32]>(),
        blinding in any::<[u8; 32]>(),
        original in message(128),
        replacement in message(128),
    ) {
        let ch = ChameleonHash::with_trapdoor(Trapdoor::from_bytes(trapdoor));
        let (digest, blinding) = ch.hash(&original, Some(Blinding(blinding)));

        let new_blinding = ch.modify(&original, &blinding, &replacement);
        let (new_digest, _) = ch.hash(&replacement, Some(new_blinding));

        prop_assert_eq!(digest, new_digest);
    }

    #[test]
    fn prop_chameleon_other_trapdoor_cannot_modify(
        owner in any::<[u8; 32]>(),
        outsider in any::<[u8; 32]>(),
        original in message(64),
        replacement in message(64),
    ) {
        prop_assume!(owner != outsider);
        prop_assume!(original != replacement);

        let owner = ChameleonHash::with_trapdoor(Trapdoor::from_bytes(owner));
        let outsider = ChameleonHash::with_trapdoor(Trapdoor::from_bytes(outsider));
        let (digest, blinding) = owner.hash(&original, None);

        let forged = outsider.modify(&original, &blinding, &replacement);
        prop_assert!(!owner.verify(&replacement, &forged, &digest));
    }

    #[test]
    fn prop_commitment_verifies_only_its_opening(
        value in message(128),
        other in message(128),
    ) {
        let scheme = HashCommitment::new();
        let (digest, blinding) = scheme.commit(&value);

        prop_assert!(scheme.verify(&value, &blinding, &digest));
        prop_assert_eq!(scheme.verify(&other, &blinding, &digest), other == value);
    }

    #[test]
    fn prop_ledger_invariant_holds(ops in prop::collection::vec(op(), 1..40)) {
        let wallets = [Wallet::new("A"), Wallet::new("B"), Wallet::new("C")];
        let keys = [Keypair::generate(), Keypair::generate(), Keypair::generate()];
        let mut supply: u64 = 0;

        for op in ops {
            match op {
                Op::Mint { wallet, value } => match wallets[wallet].create_token(value) {
                    Ok(token) => supply += token.value(),
                    Err(e) => {
                        prop_assert!(matches!(e, LedgerError::InvalidAmount(v) if v < 0));
                    }
                },
                Op::Transfer { from, to, pick } => {
                    let held = wallets[from].tokens();
                    if held.is_empty() {
                        continue;
                    }
                    let token = &held[pick % held.len()];
                    let result = wallets[from].transfer_token(&wallets[to], &token.id(), &keys[from]);
                    if from == to {
                        prop_assert!(matches!(result, Err(LedgerError::SelfTransfer)));
                    } else {
                        prop_assert!(result.is_ok());
                        let received = wallets[to].token(&token.id()).unwrap();
                        prop_assert_eq!(received.owner(), wallets[to].owner());
                    }
                }
            }

            for wallet in &wallets {
                prop_assert!(wallet.audit().is_ok());
                for token in wallet.tokens() {
                    prop_assert_eq!(token.owner(), wallet.owner());
                }
            }
            let total: u64 = wallets.iter().map(|w| w.balance()).sum();
            prop_assert_eq!(total, supply);
        }
    }
}

#[test]
fn test_commitments_to_distinct_values_never_collide() {
    let scheme = HashCommitment::new();
    let mut seen = HashSet::new();

    for i in 0..10_000u32 {
        let (digest, _) = scheme.commit(&i.to_be_bytes());
        assert!(seen.insert(digest), "collision at trial {}", i);
    }
}

#[test]
fn test_commitments_to_same_value_differ() {
    let scheme = HashCommitment::new();
    let (d1, _) = scheme.commit(b"same");
    let (d2, _) = scheme.commit(b"same");
    assert_ne!(d1, d2);
}
