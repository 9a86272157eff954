// Sat Oct 17 2026 - Alex

use colored::*;
use env_logger::fmt::Formatter;
use log::kv::{self, Key, Value, VisitSource};
use log::{Level, LevelFilter, Record};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use std::io::Write;

/// Encoding of the diagnostics sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Colourised, caller-annotated lines on stderr, debug and above.
    Human,
    /// One JSON object per line on stdout, info and above.
    Json,
}

impl LogFormat {
    pub fn default_level(self) -> LevelFilter {
        match self {
            LogFormat::Human => LevelFilter::Debug,
            LogFormat::Json => LevelFilter::Info,
        }
    }
}

pub struct LoggingUtils;

impl LoggingUtils {
    /// Installs the process-wide logger. Only the first call has any effect.
    pub fn init_logger(format: LogFormat) {
        let mut builder = env_logger::Builder::new();
        builder.filter_level(format.default_level()).parse_default_env();

        match format {
            LogFormat::Human => {
                builder
                    .target(env_logger::Target::Stderr)
                    .format(|buf, record| {
                        let line = format_human(record);
                        writeln!(buf, "{}", line)
                    });
            }
            LogFormat::Json => {
                builder
                    .target(env_logger::Target::Stdout)
                    .format(|buf: &mut Formatter, record| {
                        let time = buf.timestamp_millis().to_string();
                        let line = format_structured(record, &time);
                        writeln!(buf, "{}", line)
                    });
            }
        }

        builder.try_init().ok();
    }
}

struct FieldCollector {
    fields: Vec<(String, String)>,
}

impl<'kvs> VisitSource<'kvs> for FieldCollector {
    fn visit_pair(&mut self, key: Key<'kvs>, value: Value<'kvs>) -> Result<(), kv::Error> {
        self.fields.push((key.to_string(), value.to_string()));
        Ok(())
    }
}

fn collect_fields(record: &Record) -> Vec<(String, String)> {
    let mut collector = FieldCollector { fields: Vec::new() };
    record.key_values().visit(&mut collector).ok();
    collector.fields
}

fn fields_object(fields: Vec<(String, String)>) -> Map<String, JsonValue> {
    fields
        .into_iter()
        .map(|(key, value)| (key, JsonValue::String(value)))
        .collect()
}

/// `file:line`, trimmed to the last two path components.
fn short_caller(record: &Record) -> String {
    let file = record.file().unwrap_or("<unknown>");
    let mut parts: Vec<&str> = file.rsplit(['/', '\\']).take(2).collect();
    parts.reverse();
    match record.line() {
        Some(line) => format!("{}:{}", parts.join("/"), line),
        None => parts.join("/"),
    }
}

fn format_level(level: Level) -> ColoredString {
    match level {
        Level::Error => "ERROR".red().bold(),
        Level::Warn => "WARN ".yellow().bold(),
        Level::Info => "INFO ".green().bold(),
        Level::Debug => "DEBUG".blue().bold(),
        Level::Trace => "TRACE".magenta().bold(),
    }
}

pub fn format_human(record: &Record) -> String {
    let mut line = format!(
        "{}\t{}\t{}",
        format_level(record.level()),
        short_caller(record).as_str().dimmed(),
        record.args()
    );

    let fields = collect_fields(record);
    if !fields.is_empty() {
        let object = JsonValue::Object(fields_object(fields));
        line.push('\t');
        line.push_str(&object.to_string());
    }

    line
}

pub fn format_structured(record: &Record, time: &str) -> String {
    let mut object = Map::new();
    object.insert("level".to_string(), JsonValue::from(record.level().as_str().to_lowercase()));
    object.insert("time".to_string(), JsonValue::from(time));
    object.insert("caller".to_string(), JsonValue::from(short_caller(record)));
    object.insert("msg".to_string(), JsonValue::from(record.args().to_string()));

    for (key, value) in fields_object(collect_fields(record)) {
        object.entry(key).or_insert(value);
    }

    JsonValue::Object(object).to_string()
}
