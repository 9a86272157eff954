// Sat Oct 17 2026 - Alex

use super::args::Args;
use crate::config::{Config, ConfigError};
use crate::output::JsonRenderer;
use crate::scripting::{OutputKind, ScriptError, ScriptRuntime, ScriptSource};
use crate::utils::logging::LoggingUtils;
use crate::utils::workdir::WorkingDirGuard;

/// Exit status for configuration problems (nothing was executed).
pub const EXIT_CONFIG: u8 = 2;
/// Exit status for any failed script execution.
pub const EXIT_SCRIPT: u8 = 1;

pub struct CommandHandler;

impl CommandHandler {
    pub fn new() -> Self {
        Self
    }

    /// Sets up logging, then runs the configured script and renders its result.
    pub fn execute(&self, args: Args) -> anyhow::Result<()> {
        let config = args.to_config();
        LoggingUtils::init_logger(config.log_format);
        self.run(config)
    }

    pub fn run(&self, config: Config) -> anyhow::Result<()> {
        if let Err(e) = config.validate() {
            log::error!("{}", e);
            return Err(e.into());
        }
        let file = config.script_path()?.clone();

        // Later steps change directory, so pin the script path first.
        let path = std::path::absolute(&file).map_err(|source| {
            let err = ConfigError::Unresolvable {
                path: file.clone(),
                source,
            };
            log::error!(file:% = file.display(); "{}", err);
            err
        })?;

        let source = ScriptSource::load(&path).map_err(|e| {
            log::error!(file:% = file.display(); "{}", e);
            match e {
                ScriptError::Read { path, source } => ConfigError::Unreadable { path, source },
                other => ConfigError::Invalid(other.to_string()),
            }
        })?;

        let guard = WorkingDirGuard::enter(&path).map_err(|source| {
            let err = ConfigError::Unresolvable {
                path: path.clone(),
                source,
            };
            log::error!(file:% = file.display(); "{}", err);
            err
        })?;

        let runtime = ScriptRuntime::new(config.clone()).with_search_root(guard.current().to_path_buf());
        let result = runtime.run(source);

        if let Err(e) = guard.restore() {
            log::error!(err:% = e; "failed to restore working directory");
        }

        let output = match result {
            Ok(output) => output,
            Err(e) => {
                log_script_error(&file, &e);
                return Err(e.into());
            }
        };

        if output.kind() == OutputKind::Unstringifiable {
            log::warn!(file:% = file.display(), err = output.text(); "Couldn't stringify the value returned by {}()", config.entry_point);
            return Ok(());
        }

        log::info!(file:% = file.display(), res = output.text(); "got the following resources");

        let renderer = JsonRenderer::new().with_color(config.use_color);
        if let Err(e) = renderer.print_document(output.text()) {
            match e.input() {
                Some(input) => log::warn!(string = input; "Couldn't decode yaml or json from input string"),
                None => log::warn!(err:% = e; "couldn't print the rendered document"),
            }
        }

        Ok(())
    }
}

impl Default for CommandHandler {
    fn default() -> Self {
        Self::new()
    }
}

fn log_script_error(file: &std::path::Path, e: &ScriptError) {
    match e {
        ScriptError::Compile { message, .. } => {
            log::error!(file:% = file.display(), err = message.as_str(); "Error compiling")
        }
        ScriptError::Runtime { message, .. } => {
            log::error!(file:% = file.display(), err = message.as_str(); "error running script")
        }
        ScriptError::EntryPointMissing { name, .. } => {
            log::error!(file:% = file.display(); "couldn't find function '{}()' in the javascript", name)
        }
        ScriptError::EntryPointFailed { name, message, .. } => {
            log::error!(file:% = file.display(), err = message.as_str(); "{}(): Unable to call {}() in js", name, name)
        }
        other => log::error!(file:% = file.display(); "{}", other),
    }
}

/// Process exit status for an error returned by [`CommandHandler::execute`].
pub fn exit_code(err: &anyhow::Error) -> u8 {
    if err.downcast_ref::<ConfigError>().is_some() {
        EXIT_CONFIG
    } else {
        EXIT_SCRIPT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_script_is_config_error() {
        let err = CommandHandler::new().run(Config::new()).unwrap_err();
        assert_eq!(exit_code(&err), EXIT_CONFIG);
        assert_eq!(err.to_string(), "please specify --file foo.js");
    }

    #[test]
    fn test_unreadable_script_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::new().with_script(dir.path().join("absent.js"));
        let err = CommandHandler::new().run(config).unwrap_err();
        assert_eq!(exit_code(&err), EXIT_CONFIG);
    }

    #[test]
    fn test_script_errors_map_to_script_exit() {
        let err: anyhow::Error = ScriptError::Environment("boom".to_string()).into();
        assert_eq!(exit_code(&err), EXIT_SCRIPT);
    }
}
