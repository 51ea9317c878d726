//! Wallet: owns a balance and a set of tokens
//!
//! Each wallet guards `(balance, tokens, in_flight)` with one mutex. A transfer
//! is two independently locked steps: the recipient verifies and credits under
//! its own lock, then the sender debits under its lock. The sender never holds
//! its lock while the recipient's is taken.
//!
//! Known limitation: the two steps are not one transaction. If the process dies
//! after the recipient credits and before the sender debits, the token is held
//! by both wallets.
//!
//! Known limitation: a recipient checks the signature against whatever key the
//! sender presents. No key is bound to an owner identity.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::error::{LedgerError, Result};
use crate::signature::{key_fingerprint, Ed25519Provider, Signature, SignatureProvider};
use crate::types::TokenId;

use super::token::Token;

#[derive(Debug, Default)]
struct WalletState {
    balance: u64,
    tokens: BTreeMap<TokenId, Token>,
    /// Tokens with a transfer between the sender's two critical sections
    in_flight: HashSet<TokenId>,
}

impl WalletState {
    fn token_sum(&self) -> u128 {
        self.tokens.values().map(|t| t.value() as u128).sum()
    }
}

/// Point-in-time copy of a wallet's state
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletSnapshot {
    pub owner: String,
    pub balance: u64,
    pub tokens: Vec<Token>,
}

/// Token wallet, generic over the signature scheme
#[derive(Debug)]
pub struct Wallet<P: SignatureProvider = Ed25519Provider> {
    owner: String,
    provider: P,
    state: Mutex<WalletState>,
}

impl Wallet<Ed25519Provider> {
    /// Create an empty Ed25519 wallet
    pub fn new(owner: impl Into<String>) -> Self {
        Self::with_provider(owner, Ed25519Provider)
    }
}

impl<P: SignatureProvider> Wallet<P> {
    /// Create an empty wallet using `provider` for signatures
    pub fn with_provider(owner: impl Into<String>, provider: P) -> Self {
        Self {
            owner: owner.into(),
            provider,
            state: Mutex::new(WalletState::default()),
        }
    }

    // Every critical section leaves the state consistent before anything that
    // can panic, so a poisoned lock still guards valid data.
    fn state(&self) -> MutexGuard<'_, WalletState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn balance(&self) -> u64 {
        self.state().balance
    }

    /// Held tokens, ordered by id
    pub fn tokens(&self) -> Vec<Token> {
        self.state().tokens.values().cloned().collect()
    }

    pub fn token(&self, id: &TokenId) -> Option<Token> {
        self.state().tokens.get(id).cloned()
    }

    pub fn snapshot(&self) -> WalletSnapshot {
        let state = self.state();
        WalletSnapshot {
            owner: self.owner.clone(),
            balance: state.balance,
            tokens: state.tokens.values().cloned().collect(),
        }
    }

    /// Check `balance == sum(token values)`
    pub fn audit(&self) -> Result<()> {
        let state = self.state();
        let computed = state.token_sum();
        if computed != state.balance as u128 {
            return Err(LedgerError::LedgerCorrupted {
                balance: state.balance,
                computed: u64::try_from(computed).unwrap_or(u64::MAX),
            });
        }
        Ok(())
    }

    /// Mint a token owned by this wallet and credit its value
    pub fn create_token(&self, value: i64) -> Result<Token> {
        let value = u64::try_from(value).map_err(|_| LedgerError::InvalidAmount(value))?;

        let mut state = self.state();
        let balance = state
            .balance
            .checked_add(value)
            .ok_or(LedgerError::BalanceOverflow {
                balance: state.balance,
                amount: value,
            })?;

        let mut id = TokenId::random();
        while state.tokens.contains_key(&id) {
            id = TokenId::random();
        }

        let token = Token::new(id, value, self.owner.clone());
        state.tokens.insert(id, token.clone());
        state.balance = balance;

        tracing::debug!(owner = %self.owner, token = %id, value, "minted token");
        Ok(token)
    }

    /// Sign the token's canonical encoding
    pub fn sign_token(&self, signing_key: &P::SigningKey, token: &Token) -> Result<Signature> {
        self.provider.sign(signing_key, &token.canonical_bytes())
    }

    /// Verify a signature over the token's canonical encoding.
    ///
    /// Bad or malformed signatures give `Ok(false)`; malformed keys are errors.
    pub fn verify_token(
        &self,
        verifying_key: &P::VerifyingKey,
        token: &Token,
        signature: &Signature,
    ) -> Result<bool> {
        self.provider
            .verify(verifying_key, &token.canonical_bytes(), signature)
    }

    /// Sign a held token and hand it to `recipient`.
    ///
    /// The sender is debited only after the recipient has verified and stored
    /// the token. On rejection the sender's state is left untouched.
    pub fn transfer_token(
        &self,
        recipient: &Wallet<P>,
        token_id: &TokenId,
        signing_key: &P::SigningKey,
    ) -> Result<()> {
        if recipient.owner == self.owner {
            return Err(LedgerError::SelfTransfer);
        }

        let token = {
            let mut state = self.state();
            let token = state
                .tokens
                .get(token_id)
                .cloned()
                .ok_or(LedgerError::TokenNotFound(*token_id))?;
            if token.owner() != self.owner {
                return Err(LedgerError::NotOwner {
                    token: *token_id,
                    owner: token.owner().to_string(),
                });
            }
            if !state.in_flight.insert(*token_id) {
                return Err(LedgerError::TransferInProgress(*token_id));
            }
            token
        };

        let signature = match self.sign_token(signing_key, &token) {
            Ok(signature) => signature,
            Err(e) => {
                self.state().in_flight.remove(token_id);
                return Err(e);
            }
        };
        let sender_key = self.provider.public_key(signing_key);

        let accepted = recipient.receive_token(token.clone(), &signature, &sender_key);

        let mut state = self.state();
        state.in_flight.remove(token_id);

        match accepted {
            Ok(()) => {}
            Err(
                e @ (LedgerError::InvalidSignature
                | LedgerError::DuplicateToken(_)
                | LedgerError::BalanceOverflow { .. }),
            ) => {
                tracing::warn!(
                    from = %self.owner,
                    to = %recipient.owner,
                    token = %token_id,
                    error = %e,
                    "transfer rejected by recipient"
                );
                return Err(LedgerError::TransferRejected(e.to_string()));
            }
            // Faults such as malformed key material are not a rejection
            Err(e) => return Err(e),
        }

        // The token stayed in `tokens` while in flight, so it is still counted
        let balance = match state.balance.checked_sub(token.value()) {
            Some(balance) => balance,
            None => {
                return Err(LedgerError::LedgerCorrupted {
                    balance: state.balance,
                    computed: u64::try_from(state.token_sum()).unwrap_or(u64::MAX),
                });
            }
        };
        state.tokens.remove(token_id);
        state.balance = balance;

        tracing::info!(
            from = %self.owner,
            to = %recipient.owner,
            token = %token_id,
            value = token.value(),
            "transferred token"
        );
        Ok(())
    }

    /// Verify an incoming token and take ownership of it.
    ///
    /// Verification runs over the token as signed by the sender. On success the
    /// token's owner becomes this wallet and its value is credited.
    ///
    /// `sender_key` is taken as presented: nothing here binds it to
    /// `token.owner()`. Callers that need that guarantee must map owner
    /// identities to keys themselves.
    pub fn receive_token(
        &self,
        mut token: Token,
        signature: &Signature,
        sender_key: &P::VerifyingKey,
    ) -> Result<()> {
        if !self.verify_token(sender_key, &token, signature)? {
            tracing::warn!(
                owner = %self.owner,
                token = %token.id(),
                sender = %key_fingerprint(sender_key.as_ref()),
                "rejected token with invalid signature"
            );
            return Err(LedgerError::InvalidSignature);
        }

        let id = token.id();
        let mut state = self.state();
        if state.tokens.contains_key(&id) {
            return Err(LedgerError::DuplicateToken(id));
        }
        let balance = state
            .balance
            .checked_add(token.value())
            .ok_or(LedgerError::BalanceOverflow {
                balance: state.balance,
                amount: token.value(),
            })?;

        token.set_owner(self.owner.clone());
        state.balance = balance;
        state.tokens.insert(id, token);

        tracing::debug!(
            owner = %self.owner,
            token = %id,
            sender = %key_fingerprint(sender_key.as_ref()),
            "accepted token"
        );
        Ok(())
    }
}
