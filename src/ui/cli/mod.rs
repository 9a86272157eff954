// Sat Oct 17 2026 - Alex

pub mod args;
pub mod handler;

pub use args::Args;
pub use handler::{exit_code, CommandHandler, EXIT_CONFIG, EXIT_SCRIPT};

use clap::Parser;

/// Parses the process arguments and runs one script end to end.
/// Map the error through [`exit_code`] for the process status.
pub fn run() -> anyhow::Result<()> {
    CommandHandler::new().execute(Args::parse())
}
