// Sat Oct 17 2026 - Alex

use colored::{Color, Colorize};
use serde_json::Value;
use std::io::Write;
use thiserror::Error;

pub const BANNER_START: &str = "--- json retrieved from js follows ---";
pub const BANNER_END: &str = "---";

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("couldn't decode yaml or json from input string: {message}")]
    Decode { input: String, message: String },

    #[error("decoded document is not a mapping or sequence")]
    NotStructured { input: String },

    #[error("unable to write rendered document: {0}")]
    Io(#[from] std::io::Error),
}

impl RenderError {
    /// The string that failed to decode, if any.
    pub fn input(&self) -> Option<&str> {
        match self {
            RenderError::Decode { input, .. } | RenderError::NotStructured { input } => Some(input),
            RenderError::Io(_) => None,
        }
    }
}

/// Parses JSON, falling back to YAML, into a generic tree.
/// Only mappings and sequences are accepted.
pub fn decode_document(input: &str) -> Result<Value, RenderError> {
    let value = match serde_json::from_str::<Value>(input) {
        Ok(value) => value,
        Err(_) => serde_yaml::from_str::<Value>(input).map_err(|e| RenderError::Decode {
            input: input.to_string(),
            message: e.to_string(),
        })?,
    };

    match value {
        Value::Object(_) | Value::Array(_) => Ok(value),
        _ => Err(RenderError::NotStructured {
            input: input.to_string(),
        }),
    }
}

#[derive(Debug, Clone, Copy)]
struct Palette {
    key: Color,
    string: Color,
    number: Color,
    boolean: Color,
    null: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            key: Color::Blue,
            string: Color::Green,
            number: Color::Cyan,
            boolean: Color::Yellow,
            null: Color::Magenta,
        }
    }
}

/// Indented, optionally colourised JSON for the terminal, keys sorted.
#[derive(Debug, Clone)]
pub struct JsonRenderer {
    indent_size: usize,
    use_color: bool,
    palette: Palette,
}

impl JsonRenderer {
    pub fn new() -> Self {
        Self {
            indent_size: 2,
            use_color: true,
            palette: Palette::default(),
        }
    }

    pub fn with_color(mut self, use_color: bool) -> Self {
        self.use_color = use_color;
        self
    }

    pub fn render(&self, value: &Value) -> String {
        let mut out = String::new();
        self.write_value(&mut out, value, 0);
        out
    }

    /// Decodes `input` and writes it between the banner lines.
    /// Nothing is written when decoding fails.
    pub fn write_document<W: Write>(&self, out: &mut W, input: &str) -> Result<(), RenderError> {
        let document = decode_document(input)?;
        writeln!(out, "{}", BANNER_START)?;
        writeln!(out, "{}", self.render(&document))?;
        writeln!(out, "{}", BANNER_END)?;
        Ok(())
    }

    pub fn print_document(&self, input: &str) -> Result<(), RenderError> {
        let stdout = std::io::stdout();
        let mut lock = stdout.lock();
        self.write_document(&mut lock, input)?;
        lock.flush()?;
        Ok(())
    }

    fn write_value(&self, out: &mut String, value: &Value, depth: usize) {
        match value {
            Value::Object(map) if map.is_empty() => out.push_str("{}"),
            Value::Object(map) => {
                out.push_str("{\n");
                let mut entries: Vec<(&String, &Value)> = map.iter().collect();
                entries.sort_by(|a, b| a.0.cmp(b.0));
                let last = entries.len() - 1;
                for (i, (key, item)) in entries.into_iter().enumerate() {
                    self.push_indent(out, depth + 1);
                    out.push_str(&self.paint(&quote(key), self.palette.key));
                    out.push_str(": ");
                    self.write_value(out, item, depth + 1);
                    if i != last {
                        out.push(',');
                    }
                    out.push('\n');
                }
                self.push_indent(out, depth);
                out.push('}');
            }
            Value::Array(items) if items.is_empty() => out.push_str("[]"),
            Value::Array(items) => {
                out.push_str("[\n");
                let last = items.len() - 1;
                for (i, item) in items.iter().enumerate() {
                    self.push_indent(out, depth + 1);
                    self.write_value(out, item, depth + 1);
                    if i != last {
                        out.push(',');
                    }
                    out.push('\n');
                }
                self.push_indent(out, depth);
                out.push(']');
            }
            Value::String(s) => out.push_str(&self.paint(&quote(s), self.palette.string)),
            Value::Number(n) => out.push_str(&self.paint(&n.to_string(), self.palette.number)),
            Value::Bool(b) => out.push_str(&self.paint(&b.to_string(), self.palette.boolean)),
            Value::Null => out.push_str(&self.paint("null", self.palette.null)),
        }
    }

    fn push_indent(&self, out: &mut String, depth: usize) {
        out.push_str(&" ".repeat(depth * self.indent_size));
    }

    fn paint(&self, text: &str, color: Color) -> String {
        if self.use_color {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }
}

impl Default for JsonRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn quote(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| format!("\"{}\"", s))
}
