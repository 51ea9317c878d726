//! CLI module

pub mod app;
pub mod commands;

pub use app::execute;
pub use commands::{ChameleonAction, Cli, Commands, CommitAction, DemoAction};
