// Sat Oct 17 2026 - Alex

use crate::scripting::error::ScriptError;
use std::fmt;
use std::path::{Path, PathBuf};

/// Script text read once from disk, never mutated afterwards.
#[derive(Debug, Clone)]
pub struct ScriptSource {
    path: PathBuf,
    text: String,
}

impl ScriptSource {
    pub fn load(path: &Path) -> Result<Self, ScriptError> {
        let text = std::fs::read_to_string(path).map_err(|source| ScriptError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self {
            path: path.to_path_buf(),
            text,
        })
    }

    pub fn from_text(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Directory that relative `require` calls from the script resolve against.
    pub fn base_dir(&self) -> PathBuf {
        let absolute = std::path::absolute(&self.path).unwrap_or_else(|_| self.path.clone());
        absolute
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

/// The entry point's return value, already stringified inside the interpreter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptOutput {
    text: String,
    kind: OutputKind,
}

/// What the entry point handed back before stringification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    String,
    Object,
    Primitive,
    Undefined,
    /// Stringification threw (cyclic object, BigInt, Symbol). The text is the cause.
    Unstringifiable,
}

impl ScriptOutput {
    pub fn new(text: impl Into<String>, kind: OutputKind) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn kind(&self) -> OutputKind {
        self.kind
    }
}

impl fmt::Display for ScriptOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
