//! Error types for the offline ledger

use crate::types::TokenId;
use thiserror::Error;

/// Main error type for ledger and signature operations
#[derive(Error, Debug)]
pub enum LedgerError {
    // Minting errors
    #[error("Invalid amount: {0} (token values must be non-negative)")]
    InvalidAmount(i64),

    #[error("Balance overflow: crediting {amount} to a balance of {balance}")]
    BalanceOverflow { balance: u64, amount: u64 },

    // Transfer errors
    #[error("Token not found: {0}")]
    TokenNotFound(TokenId),

    #[error("Not the owner of token {token}: held token is owned by {owner}")]
    NotOwner { token: TokenId, owner: String },

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Transfer rejected by recipient: {0}")]
    TransferRejected(String),

    #[error("Transfer already in progress for token: {0}")]
    TransferInProgress(TokenId),

    #[error("Cannot transfer a token to its current holder")]
    SelfTransfer,

    #[error("Token already held: {0}")]
    DuplicateToken(TokenId),

    #[error("Ledger corrupted: balance {balance} does not match token sum {computed}")]
    LedgerCorrupted { balance: u64, computed: u64 },

    // Key material errors
    #[error("Invalid public key")]
    InvalidPublicKey,

    // General errors
    #[error("Hex decode error: {0}")]
    HexDecode(#[from] hex::FromHexError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for ledger operations
pub type Result<T> = std::result::Result<T, LedgerError>;
