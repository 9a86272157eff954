// Sat Oct 17 2026 - Alex

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Failures of a single script execution. Every variant ends the run.
///
/// Interpreter errors are flattened to strings inside the worker thread,
/// since interpreter values cannot leave it.
#[derive(Error, Debug)]
pub enum ScriptError {
    #[error("unable to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unable to set up the script environment: {0}")]
    Environment(String),

    #[error("error compiling {}: {message}", .path.display())]
    Compile { path: PathBuf, message: String },

    #[error("error running {}: {message}", .path.display())]
    Runtime { path: PathBuf, message: String },

    #[error("couldn't find function '{name}()' in the javascript ({})", .path.display())]
    EntryPointMissing { name: String, path: PathBuf },

    #[error("{name}(): unable to call {name}() in {}: {message}", .path.display())]
    EntryPointFailed {
        name: String,
        path: PathBuf,
        message: String,
    },

    #[error("execution of {} timed out after {after:?}", .path.display())]
    TimedOut { path: PathBuf, after: Duration },

    #[error("script worker for {} stopped without a result", .path.display())]
    WorkerLost { path: PathBuf },
}

impl ScriptError {
    /// Lifecycle state the environment was left in.
    pub fn stage(&self) -> ExecutionStage {
        match self {
            ScriptError::Read { .. } | ScriptError::Environment(_) => ExecutionStage::Created,
            ScriptError::Compile { .. } => ExecutionStage::CompileFailed,
            ScriptError::Runtime { .. } | ScriptError::WorkerLost { .. } => {
                ExecutionStage::RuntimeFailed
            }
            ScriptError::EntryPointMissing { .. } => ExecutionStage::EntryPointMissing,
            ScriptError::EntryPointFailed { .. } => ExecutionStage::EntryPointFailed,
            ScriptError::TimedOut { .. } => ExecutionStage::TimedOut,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionStage {
    Created,
    Compiled,
    Running,
    Succeeded,
    CompileFailed,
    RuntimeFailed,
    EntryPointMissing,
    EntryPointFailed,
    TimedOut,
}

#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("Cannot find module '{specifier}' from {}", .from.display())]
    NotFound { specifier: String, from: PathBuf },

    #[error("invalid package manifest {}: {message}", .path.display())]
    InvalidPackage { path: PathBuf, message: String },

    #[error("unable to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_entry_point_names_function_and_file() {
        let err = ScriptError::EntryPointMissing {
            name: "getData".to_string(),
            path: PathBuf::from("scripts/data.js"),
        };
        let message = err.to_string();
        assert!(message.contains("getData()"));
        assert!(message.contains("scripts/data.js"));
        assert_eq!(err.stage(), ExecutionStage::EntryPointMissing);
    }
}
