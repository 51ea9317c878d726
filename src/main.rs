//! offline-crypto CLI binary

use anyhow::Context;
use clap::Parser;
use offline_crypto::cli::{execute, Cli};

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let report = execute(cli.command).context("command failed")?;
    let rendered = serde_json::to_string_pretty(&report).context("failed to render report")?;
    println!("{}", rendered);

    Ok(())
}
