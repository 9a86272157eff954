// Sat Oct 17 2026 - Alex

use crate::config::Config;
use crate::scripting::engine::ScriptEngine;
use crate::scripting::error::ScriptError;
use crate::scripting::types::{ScriptOutput, ScriptSource};
use std::path::PathBuf;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;

const WORKER_STACK_SIZE: usize = 16 * 1024 * 1024;

/// Runs a script's whole lifecycle on a dedicated worker thread, bounded by
/// the configured deadline.
///
/// The interpreter cannot be interrupted from outside. On timeout the worker
/// is abandoned and keeps running until the process exits.
pub struct ScriptRuntime {
    config: Config,
    search_root: Option<PathBuf>,
}

impl ScriptRuntime {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            search_root: None,
        }
    }

    /// Directory that relative search-path entries are anchored at.
    /// Defaults to the working directory at the time of `run`.
    pub fn with_search_root(mut self, root: PathBuf) -> Self {
        self.search_root = Some(root);
        self
    }

    pub fn run(&self, source: ScriptSource) -> Result<ScriptOutput, ScriptError> {
        let root = match &self.search_root {
            Some(root) => root.clone(),
            None => std::env::current_dir().map_err(|e| ScriptError::Environment(e.to_string()))?,
        };
        let path = source.path().to_path_buf();
        let config = self.config.clone();
        let (tx, rx) = mpsc::channel();

        let worker = thread::Builder::new()
            .name("script-host".to_string())
            .stack_size(WORKER_STACK_SIZE)
            .spawn(move || {
                let result = ScriptEngine::new(&config, &source, &root)
                    .and_then(|engine| engine.execute(&source));
                tx.send(result).ok();
            })
            .map_err(|e| ScriptError::Environment(e.to_string()))?;

        let received = match self.config.timeout() {
            Some(after) => match rx.recv_timeout(after) {
                Ok(result) => result,
                Err(RecvTimeoutError::Timeout) => {
                    log::warn!(file:% = path.display(), after:? = after; "abandoning script worker");
                    return Err(ScriptError::TimedOut { path, after });
                }
                Err(RecvTimeoutError::Disconnected) => Err(ScriptError::WorkerLost { path: path.clone() }),
            },
            None => rx
                .recv()
                .unwrap_or_else(|_| Err(ScriptError::WorkerLost { path: path.clone() })),
        };

        if worker.join().is_err() {
            return Err(ScriptError::WorkerLost { path });
        }
        received
    }
}
