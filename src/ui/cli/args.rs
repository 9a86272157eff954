// Sat Oct 17 2026 - Alex

use crate::config::Config;
use crate::utils::logging::LogFormat;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "jsprobe")]
#[command(author = "Alex")]
#[command(version = "1.0.0")]
#[command(about = "Runs a script's getData() and pretty-prints what it returns", long_about = None)]
pub struct Args {
    /// which file to run
    #[arg(long)]
    pub file: Option<PathBuf>,

    #[arg(long, value_enum, env = "JSPROBE_LOG_FORMAT", default_value = "human")]
    pub log_format: LogFormat,

    /// Seconds to wait for the script before giving up (0 waits forever)
    #[arg(long, default_value_t = 30)]
    pub timeout: u64,

    #[arg(long)]
    pub no_color: bool,
}

impl Args {
    pub fn to_config(&self) -> Config {
        let mut config = Config::new()
            .with_log_format(self.log_format)
            .with_timeout_seconds(self.timeout)
            .with_color(!self.no_color);
        config.script = self.file.clone();
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_file_flag() {
        let args = Args::try_parse_from(["jsprobe", "--file", "data.js"]).unwrap();
        let config = args.to_config();
        assert_eq!(config.script, Some(PathBuf::from("data.js")));
        assert_eq!(config.timeout_seconds, 30);
        assert!(config.use_color);
    }

    #[test]
    fn test_file_is_optional_to_the_parser() {
        let args = Args::try_parse_from(["jsprobe"]).unwrap();
        assert!(args.file.is_none());
        assert!(args.to_config().validate().is_err());
    }

    #[test]
    fn test_parse_log_format_and_timeout() {
        let args = Args::try_parse_from([
            "jsprobe", "--file", "x.js", "--log-format", "json", "--timeout", "0", "--no-color",
        ])
        .unwrap();
        let config = args.to_config();
        assert_eq!(config.log_format, LogFormat::Json);
        assert!(config.timeout().is_none());
        assert!(!config.use_color);
    }
}
