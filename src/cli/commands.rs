//! CLI command definitions

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "offline-crypto")]
#[command(about = "Chameleon hashes, hash commitments, and signed token transfers", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Trapdoor hash operations
    Chameleon {
        #[command(subcommand)]
        action: ChameleonAction,
    },

    /// Hash commitment operations
    Commit {
        #[command(subcommand)]
        action: CommitAction,
    },

    /// Run in-memory wallet scenarios
    Demo {
        #[command(subcommand)]
        action: DemoAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ChameleonAction {
    /// Hash a message
    Hash {
        /// Message to hash
        #[arg(short, long)]
        message: String,

        /// Trapdoor as hex (random if omitted)
        #[arg(short, long)]
        trapdoor: Option<String>,

        /// Blinding as hex (random if omitted)
        #[arg(short, long)]
        blinding: Option<String>,
    },

    /// Hash a message, then open the same digest to a second message
    Collide {
        /// Original message
        #[arg(short, long)]
        message: String,

        /// Replacement message
        #[arg(short, long)]
        new_message: String,

        /// Trapdoor as hex (random if omitted)
        #[arg(short, long)]
        trapdoor: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum CommitAction {
    /// Commit to a value
    Create {
        /// Value to commit to
        #[arg(short, long)]
        value: String,
    },

    /// Check an opening against a digest
    Verify {
        /// Revealed value
        #[arg(short, long)]
        value: String,

        /// Blinding as hex
        #[arg(short, long)]
        blinding: String,

        /// Commitment digest as hex
        #[arg(short, long)]
        digest: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum DemoAction {
    /// Mint a token, sign it, and transfer it between two wallets
    Transfer {
        /// Token value to mint
        #[arg(short, long, allow_negative_numbers = true)]
        amount: i64,

        /// Sending wallet owner
        #[arg(short, long, default_value = "A")]
        from: String,

        /// Receiving wallet owner
        #[arg(short, long, default_value = "B")]
        to: String,
    },
}
