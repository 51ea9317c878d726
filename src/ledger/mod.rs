//! In-memory token ledger

pub mod token;
pub mod wallet;

pub use token::Token;
pub use wallet::{Wallet, WalletSnapshot};
