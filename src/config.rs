// Sat Oct 17 2026 - Alex

use crate::utils::logging::LogFormat;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Name of the function every script must expose to hand back its data.
pub const ENTRY_POINT: &str = "getData";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub script: Option<PathBuf>,
    pub search_path: Vec<String>,
    pub entry_point: String,
    pub strict: bool,
    pub timeout_seconds: u64,
    pub loop_iteration_limit: Option<u64>,
    pub recursion_limit: Option<usize>,
    pub log_format: LogFormat,
    pub use_color: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            script: None,
            search_path: vec![".".to_string(), "..".to_string(), "./libs".to_string()],
            entry_point: ENTRY_POINT.to_string(),
            strict: true,
            timeout_seconds: 30,
            loop_iteration_limit: None,
            recursion_limit: None,
            log_format: LogFormat::Human,
            use_color: true,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_script(mut self, script: PathBuf) -> Self {
        self.script = Some(script);
        self
    }

    pub fn with_search_path<I, S>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.search_path = dirs.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_timeout_seconds(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    pub fn with_loop_iteration_limit(mut self, limit: u64) -> Self {
        self.loop_iteration_limit = Some(limit);
        self
    }

    pub fn with_log_format(mut self, format: LogFormat) -> Self {
        self.log_format = format;
        self
    }

    pub fn with_color(mut self, use_color: bool) -> Self {
        self.use_color = use_color;
        self
    }

    /// `None` when the deadline is disabled.
    pub fn timeout(&self) -> Option<Duration> {
        if self.timeout_seconds == 0 {
            None
        } else {
            Some(Duration::from_secs(self.timeout_seconds))
        }
    }

    /// The script path, or the error the CLI reports when `--file` is absent.
    pub fn script_path(&self) -> Result<&PathBuf, ConfigError> {
        self.script.as_ref().ok_or(ConfigError::MissingScript)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let script = self.script_path()?;
        if script.as_os_str().is_empty() {
            return Err(ConfigError::MissingScript);
        }
        if self.entry_point.is_empty() {
            return Err(ConfigError::Invalid("entry_point must not be empty".to_string()));
        }
        if self.search_path.iter().any(|dir| dir.is_empty()) {
            return Err(ConfigError::Invalid("search_path entries must not be empty".to_string()));
        }
        Ok(())
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("please specify --file foo.js")]
    MissingScript,

    #[error("unable to read {}: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unable to resolve {}: {source}", .path.display())]
    Unresolvable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_search_path_order() {
        let config = Config::default();
        assert_eq!(config.search_path, vec![".", "..", "./libs"]);
        assert_eq!(config.entry_point, "getData");
        assert!(config.strict);
    }

    #[test]
    fn test_missing_script_message() {
        let err = Config::new().validate().unwrap_err();
        assert_eq!(err.to_string(), "please specify --file foo.js");
    }

    #[test]
    fn test_validate_with_script() {
        let config = Config::new().with_script(PathBuf::from("data.js"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_search_entry_rejected() {
        let config = Config::new()
            .with_script(PathBuf::from("data.js"))
            .with_search_path(vec![".", ""]);
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_zero_timeout_disables_deadline() {
        assert!(Config::new().with_timeout_seconds(0).timeout().is_none());
        assert_eq!(
            Config::new().with_timeout_seconds(5).timeout(),
            Some(Duration::from_secs(5))
        );
    }
}
