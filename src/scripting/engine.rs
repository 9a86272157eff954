// Sat Oct 17 2026 - Alex

use crate::config::Config;
use crate::scripting::api::{describe_error, json_call, CapabilitySet};
use crate::scripting::builtins::ConsoleCapability;
use crate::scripting::compiler::{CompiledProgram, ScriptCompiler};
use crate::scripting::error::{ExecutionStage, ScriptError};
use crate::scripting::modules::RequireCapability;
use crate::scripting::resolver::{ModuleResolver, SearchPath};
use crate::scripting::types::{OutputKind, ScriptOutput, ScriptSource};
use boa_engine::{Context, JsObject, JsResult, JsString, JsValue};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// One interpreter instance plus its capabilities, for one script.
pub struct ScriptEngine {
    context: Context,
    compiler: ScriptCompiler,
    entry_point: String,
    path: PathBuf,
    stage: ExecutionStage,
}

/// The script's entry-point function, looked up after the top-level run.
pub struct EntryPoint {
    name: String,
    function: JsObject,
}

impl EntryPoint {
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl ScriptEngine {
    /// Builds the standard environment: `console` plus `require`, with bare
    /// specifiers searched in `config.search_path` anchored at `search_root`.
    pub fn new(config: &Config, source: &ScriptSource, search_root: &Path) -> Result<Self, ScriptError> {
        let resolver = ModuleResolver::new(SearchPath::anchored(search_root, &config.search_path));
        let capabilities = CapabilitySet::new()
            .with(ConsoleCapability)
            .with(RequireCapability::new(resolver, source.base_dir()));

        Self::with_capabilities(config, source.path(), &capabilities)
    }

    pub fn with_capabilities(
        config: &Config,
        path: &Path,
        capabilities: &CapabilitySet,
    ) -> Result<Self, ScriptError> {
        let mut context = Context::default();
        if let Some(limit) = config.loop_iteration_limit {
            context.runtime_limits_mut().set_loop_iteration_limit(limit);
        }
        if let Some(limit) = config.recursion_limit {
            context.runtime_limits_mut().set_recursion_limit(limit);
        }

        capabilities.install_all(&mut context).map_err(|e| {
            let message = describe_error(e, &mut context);
            ScriptError::Environment(message)
        })?;

        log::debug!(file:% = path.display(), capabilities:? = capabilities.names(); "created script environment");

        Ok(Self {
            context,
            compiler: ScriptCompiler::new().with_strict(config.strict),
            entry_point: config.entry_point.clone(),
            path: path.to_path_buf(),
            stage: ExecutionStage::Created,
        })
    }

    pub fn stage(&self) -> ExecutionStage {
        self.stage
    }

    pub fn compile(&mut self, source: &ScriptSource) -> Result<CompiledProgram, ScriptError> {
        let result = self.compiler.compile(source, &mut self.context);
        self.settle(result, ExecutionStage::Compiled)
    }

    pub fn run(&mut self, program: CompiledProgram) -> Result<(), ScriptError> {
        self.stage = ExecutionStage::Running;
        let result = program.run(&mut self.context);
        if let Ok(value) = &result {
            log::debug!(file:% = self.path.display(), result:% = value.display(); "top-level run finished");
        }
        self.settle(result, ExecutionStage::Running).map(|_| ())
    }

    pub fn entry_point(&mut self) -> Result<EntryPoint, ScriptError> {
        let name = JsString::from(self.entry_point.as_str());
        let lookup = self.context.global_object().get(name, &mut self.context);

        let result = match lookup {
            Ok(value) => value
                .as_callable()
                .cloned()
                .map(|function| EntryPoint {
                    name: self.entry_point.clone(),
                    function,
                })
                .ok_or_else(|| ScriptError::EntryPointMissing {
                    name: self.entry_point.clone(),
                    path: self.path.clone(),
                }),
            Err(e) => Err(ScriptError::Runtime {
                path: self.path.clone(),
                message: describe_error(e, &mut self.context),
            }),
        };
        self.settle(result, ExecutionStage::Running)
    }

    /// Calls the entry point with no arguments and stringifies what it returns.
    ///
    /// Only a failing call is an error here. A value that cannot be turned
    /// into text comes back as [`OutputKind::Unstringifiable`].
    pub fn invoke(&mut self, entry: EntryPoint) -> Result<ScriptOutput, ScriptError> {
        let returned = entry
            .function
            .call(&JsValue::undefined(), &[], &mut self.context)
            .map_err(|e| ScriptError::EntryPointFailed {
                name: entry.name.clone(),
                path: self.path.clone(),
                message: describe_error(e, &mut self.context),
            });

        let result = returned.map(|value| match stringify(&value, &mut self.context) {
            Ok(output) => output,
            Err(e) => ScriptOutput::new(describe_error(e, &mut self.context), OutputKind::Unstringifiable),
        });
        self.settle(result, ExecutionStage::Succeeded)
    }

    /// Full lifecycle: compile, run top level, resolve and invoke the entry point.
    pub fn execute(mut self, source: &ScriptSource) -> Result<ScriptOutput, ScriptError> {
        let start = Instant::now();

        let program = self.compile(source)?;
        self.run(program)?;
        let entry = self.entry_point()?;
        let output = self.invoke(entry)?;

        log::debug!(
            file:% = self.path.display(),
            elapsed:? = start.elapsed();
            "{}() returned", self.entry_point
        );
        Ok(output)
    }

    fn settle<T>(&mut self, result: Result<T, ScriptError>, next: ExecutionStage) -> Result<T, ScriptError> {
        self.stage = match &result {
            Ok(_) => next,
            Err(e) => e.stage(),
        };
        result
    }
}

/// Strings pass through, objects go through `JSON.stringify`, other values through `ToString`.
pub fn stringify(value: &JsValue, context: &mut Context) -> JsResult<ScriptOutput> {
    if let Some(text) = value.as_string() {
        return Ok(ScriptOutput::new(text.to_std_string_escaped(), OutputKind::String));
    }
    if value.is_undefined() {
        return Ok(ScriptOutput::new("undefined", OutputKind::Undefined));
    }
    if value.is_object() {
        let json = json_call("stringify", value, context)?;
        if let Some(text) = json.as_string() {
            return Ok(ScriptOutput::new(text.to_std_string_escaped(), OutputKind::Object));
        }
    }

    let text = value.to_string(context)?.to_std_string_escaped();
    Ok(ScriptOutput::new(text, OutputKind::Primitive))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn engine_for(source: &ScriptSource) -> ScriptEngine {
        let root = source.base_dir();
        ScriptEngine::new(&Config::default(), source, &root).unwrap()
    }

    fn execute(text: &str) -> Result<ScriptOutput, ScriptError> {
        let dir = tempfile::tempdir().unwrap();
        let source = ScriptSource::from_text(dir.path().join("data.js"), text);
        engine_for(&source).execute(&source)
    }

    #[test]
    fn test_string_result_passes_through() {
        let output = execute(r#"function getData() { return '{"a":1,"b":[1,2,3]}'; }"#).unwrap();
        assert_eq!(output.text(), r#"{"a":1,"b":[1,2,3]}"#);
        assert_eq!(output.kind(), OutputKind::String);
    }

    #[test]
    fn test_object_result_is_stringified() {
        let output = execute("function getData() { return { a: 1, b: [1, 2, 3] }; }").unwrap();
        let parsed: serde_json::Value = serde_json::from_str(output.text()).unwrap();
        assert_eq!(parsed, serde_json::json!({"a": 1, "b": [1, 2, 3]}));
        assert_eq!(output.kind(), OutputKind::Object);
    }

    #[test]
    fn test_undefined_result() {
        let output = execute("function getData() {}").unwrap();
        assert_eq!(output.text(), "undefined");
        assert_eq!(output.kind(), OutputKind::Undefined);
    }

    #[test]
    fn test_missing_entry_point() {
        let err = execute("function getStuff() { return '{}'; }").unwrap_err();
        assert!(matches!(err, ScriptError::EntryPointMissing { .. }));
        assert!(err.to_string().contains("getData()"));
        assert!(err.to_string().contains("data.js"));
    }

    #[test]
    fn test_non_callable_entry_point() {
        let err = execute("var getData = 42;").unwrap_err();
        assert!(matches!(err, ScriptError::EntryPointMissing { .. }));
    }

    #[test]
    fn test_entry_point_is_case_sensitive() {
        let err = execute("function getdata() { return '{}'; }").unwrap_err();
        assert!(matches!(err, ScriptError::EntryPointMissing { .. }));
    }

    #[test]
    fn test_entry_point_throws() {
        let err = execute("function getData() { throw new Error('no data'); }").unwrap_err();
        assert!(matches!(err, ScriptError::EntryPointFailed { .. }));
        assert!(err.to_string().contains("no data"));
    }

    #[test]
    fn test_cyclic_result_is_not_fatal() {
        let output = execute("function getData() { var o = {}; o.self = o; return o; }").unwrap();
        assert_eq!(output.kind(), OutputKind::Unstringifiable);
        assert!(output.text().contains("TypeError"));
    }

    #[test]
    fn test_bigint_result_is_not_fatal() {
        let output = execute("function getData() { return { n: 10n }; }").unwrap();
        assert_eq!(output.kind(), OutputKind::Unstringifiable);
        assert!(!output.text().is_empty());
    }

    #[test]
    fn test_symbol_result_is_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let source = ScriptSource::from_text(dir.path().join("data.js"), "function getData() { return Symbol('x'); }");
        let mut engine = engine_for(&source);

        let program = engine.compile(&source).unwrap();
        engine.run(program).unwrap();
        let entry = engine.entry_point().unwrap();
        let output = engine.invoke(entry).unwrap();
        assert_eq!(output.kind(), OutputKind::Unstringifiable);
        assert_eq!(engine.stage(), ExecutionStage::Succeeded);
    }

    #[test]
    fn test_compile_error_never_invokes() {
        let dir = tempfile::tempdir().unwrap();
        let source = ScriptSource::from_text(dir.path().join("bad.js"), "function getData( {");
        let mut engine = engine_for(&source);

        let err = engine.compile(&source).err().unwrap();
        assert!(matches!(err, ScriptError::Compile { .. }));
        assert_eq!(engine.stage(), ExecutionStage::CompileFailed);
    }

    #[test]
    fn test_top_level_error() {
        let err = execute("throw new Error('early'); function getData() { return '{}'; }").unwrap_err();
        assert!(matches!(err, ScriptError::Runtime { .. }));
    }

    #[test]
    fn test_stages_advance() {
        let dir = tempfile::tempdir().unwrap();
        let source = ScriptSource::from_text(dir.path().join("data.js"), "function getData() { return '[]'; }");
        let mut engine = engine_for(&source);
        assert_eq!(engine.stage(), ExecutionStage::Created);

        let program = engine.compile(&source).unwrap();
        assert_eq!(engine.stage(), ExecutionStage::Compiled);

        engine.run(program).unwrap();
        let entry = engine.entry_point().unwrap();
        assert_eq!(entry.name(), "getData");

        engine.invoke(entry).unwrap();
        assert_eq!(engine.stage(), ExecutionStage::Succeeded);
    }

    #[test]
    fn test_require_relative_to_script_dir() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("scripts")).unwrap();
        fs::write(dir.path().join("scripts/values.js"), "module.exports = [1, 2, 3];").unwrap();
        let source = ScriptSource::from_text(
            dir.path().join("scripts/data.js"),
            "const values = require('./values'); function getData() { return { values }; }",
        );

        let output = ScriptEngine::new(&Config::default(), &source, dir.path())
            .unwrap()
            .execute(&source)
            .unwrap();
        assert_eq!(output.text(), r#"{"values":[1,2,3]}"#);
    }

    #[test]
    fn test_search_path_from_root() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("libs")).unwrap();
        fs::write(dir.path().join("libs/greeting.js"), "exports.text = 'hi';").unwrap();
        let source = ScriptSource::from_text(
            dir.path().join("data.js"),
            "function getData() { return { greeting: require('greeting').text }; }",
        );

        let output = ScriptEngine::new(&Config::default(), &source, dir.path())
            .unwrap()
            .execute(&source)
            .unwrap();
        assert_eq!(output.text(), r#"{"greeting":"hi"}"#);
    }

    #[test]
    fn test_loop_limit_stops_runaway_script() {
        let dir = tempfile::tempdir().unwrap();
        let source = ScriptSource::from_text(
            dir.path().join("spin.js"),
            "function getData() { while (true) {} }",
        );
        let config = Config::default().with_loop_iteration_limit(10_000);

        let err = ScriptEngine::new(&config, &source, dir.path())
            .unwrap()
            .execute(&source)
            .unwrap_err();
        assert!(matches!(err, ScriptError::EntryPointFailed { .. }));
    }
}
