// Sat Oct 17 2026 - Alex

use jsprobe::ui::cli::{self, exit_code};
use std::process::ExitCode;

fn main() -> ExitCode {
    match cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => ExitCode::from(exit_code(&e)),
    }
}
