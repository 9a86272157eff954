// Sat Oct 17 2026 - Alex

pub mod config;
pub mod output;
pub mod scripting;
pub mod ui;
pub mod utils;

pub use config::Config;
pub use output::JsonRenderer;
pub use scripting::{ScriptError, ScriptOutput, ScriptRuntime, ScriptSource};
pub use ui::cli::{Args, CommandHandler};
