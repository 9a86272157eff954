// Sat Oct 17 2026 - Alex

use crate::scripting::api::describe_error;
use crate::scripting::error::ScriptError;
use crate::scripting::types::ScriptSource;
use boa_engine::{Context, JsValue, Script, Source};
use std::path::{Path, PathBuf};

/// A parsed top-level script, consumed by exactly one run.
pub struct CompiledProgram {
    script: Script,
    path: PathBuf,
}

impl CompiledProgram {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Evaluates the top-level statements once.
    pub fn run(self, context: &mut Context) -> Result<JsValue, ScriptError> {
        self.script.evaluate(context).map_err(|e| ScriptError::Runtime {
            path: self.path.clone(),
            message: describe_error(e, context),
        })
    }
}

pub struct ScriptCompiler {
    strict: bool,
}

impl ScriptCompiler {
    pub fn new() -> Self {
        Self { strict: true }
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn compile(&self, source: &ScriptSource, context: &mut Context) -> Result<CompiledProgram, ScriptError> {
        context.strict(self.strict);

        let input = Source::from_bytes(source.text()).with_path(source.path());
        let script = Script::parse(input, None, context).map_err(|e| ScriptError::Compile {
            path: source.path().to_path_buf(),
            message: describe_error(e, context),
        })?;

        Ok(CompiledProgram {
            script,
            path: source.path().to_path_buf(),
        })
    }
}

impl Default for ScriptCompiler {
    fn default() -> Self {
        Self::new()
    }
}
