// Sat Oct 17 2026 - Alex

use crate::scripting::api::{json_call, Capability};
use crate::scripting::resolver::{ModuleKind, ModuleResolver, ResolvedModule};
use boa_engine::object::FunctionObjectBuilder;
use boa_engine::property::Attribute;
use boa_engine::{
    js_string, Context, JsArgs, JsNativeError, JsObject, JsResult, JsString, JsValue,
    NativeFunction,
};
use boa_gc::{Finalize, Trace};
use std::path::PathBuf;
use std::rc::Rc;

const WRAPPER_PARAMS: &[&str] = &["exports", "require", "module", "__filename", "__dirname"];

/// CommonJS `require`, resolving through a [`ModuleResolver`].
pub struct RequireCapability {
    resolver: ModuleResolver,
    base_dir: PathBuf,
}

impl RequireCapability {
    /// `base_dir` is where the top-level script's relative requires start.
    pub fn new(resolver: ModuleResolver, base_dir: PathBuf) -> Self {
        Self { resolver, base_dir }
    }
}

impl Capability for RequireCapability {
    fn name(&self) -> &'static str {
        "require"
    }

    fn install(&self, context: &mut Context) -> JsResult<()> {
        let state = RequireState {
            resolver: Rc::new(self.resolver.clone()),
            base_dir: self.base_dir.clone(),
            cache: JsObject::with_object_proto(context.intrinsics()),
        };
        let require = make_require(state, context);
        context.register_global_property(
            js_string!("require"),
            require,
            Attribute::WRITABLE | Attribute::CONFIGURABLE,
        )
    }
}

/// Per-module `require` state. Modules share the resolver and cache but
/// each gets its own base directory.
#[derive(Clone, Trace, Finalize)]
struct RequireState {
    #[unsafe_ignore_trace]
    resolver: Rc<ModuleResolver>,
    #[unsafe_ignore_trace]
    base_dir: PathBuf,
    cache: JsObject,
}

fn make_require(state: RequireState, context: &mut Context) -> JsValue {
    let function = NativeFunction::from_copy_closure_with_captures(require, state);
    FunctionObjectBuilder::new(context.realm(), function)
        .name(js_string!("require"))
        .length(1)
        .build()
        .into()
}

fn require(_this: &JsValue, args: &[JsValue], state: &RequireState, context: &mut Context) -> JsResult<JsValue> {
    let specifier = args.get_or_undefined(0).to_string(context)?.to_std_string_escaped();
    let module = state
        .resolver
        .resolve(&specifier, &state.base_dir)
        .map_err(|e| JsNativeError::error().with_message(e.to_string()))?;

    log::trace!(specifier = specifier.as_str(), module = module.id.as_str(); "require");
    load_module(&module, state, context)
}

fn load_module(module: &ResolvedModule, state: &RequireState, context: &mut Context) -> JsResult<JsValue> {
    if module.kind == ModuleKind::Builtin {
        return context.global_object().get(JsString::from(module.id.as_str()), context);
    }

    let key = JsString::from(module.id.as_str());
    let cached = state.cache.get(key.clone(), context)?;
    if let Some(record) = cached.as_object() {
        return record.get(js_string!("exports"), context);
    }

    let path = module
        .path
        .clone()
        .ok_or_else(|| JsNativeError::error().with_message(format!("module '{}' has no file", module.id)))?;
    let text = std::fs::read_to_string(&path).map_err(|e| {
        JsNativeError::error().with_message(format!("unable to read {}: {}", path.display(), e))
    })?;

    let record = JsObject::with_object_proto(context.intrinsics());
    record.set(js_string!("id"), key.clone(), false, context)?;
    state.cache.set(key.clone(), record.clone(), false, context)?;

    let loaded = match module.kind {
        ModuleKind::Json => json_call("parse", &JsValue::from(JsString::from(text.as_str())), context)
            .and_then(|value| record.set(js_string!("exports"), value, false, context)),
        _ => evaluate_commonjs(module, &path, &text, &record, state, context),
    };

    if let Err(e) = loaded {
        state.cache.delete_property_or_throw(key, context)?;
        return Err(e);
    }

    record.get(js_string!("exports"), context)
}

/// Runs a module body inside the usual CommonJS function wrapper.
///
/// The wrapper comes from the realm's `Function` constructor. Evaluating a
/// nested `Script` from inside a running module cuts that module short.
fn evaluate_commonjs(
    module: &ResolvedModule,
    path: &std::path::Path,
    text: &str,
    record: &JsObject,
    state: &RequireState,
    context: &mut Context,
) -> JsResult<bool> {
    let mut params: Vec<JsValue> = WRAPPER_PARAMS
        .iter()
        .map(|param| JsValue::from(JsString::from(*param)))
        .collect();
    params.push(JsValue::from(JsString::from(format!("'use strict';{}", text).as_str())));

    let constructor = context.intrinsics().constructors().function().constructor();
    let wrapper = constructor.construct(&params, None, context)?;

    let exports = JsObject::with_object_proto(context.intrinsics());
    record.set(js_string!("exports"), exports.clone(), false, context)?;

    let dir = module.dir().map(|d| d.to_path_buf()).unwrap_or_else(|| state.base_dir.clone());
    let child = RequireState {
        resolver: state.resolver.clone(),
        base_dir: dir.clone(),
        cache: state.cache.clone(),
    };
    let require = make_require(child, context);

    let args = [
        JsValue::from(exports.clone()),
        require,
        JsValue::from(record.clone()),
        JsValue::from(JsString::from(path.to_string_lossy().as_ref())),
        JsValue::from(JsString::from(dir.to_string_lossy().as_ref())),
    ];
    wrapper.call(&JsValue::from(exports), &args, context)?;
    Ok(true)
}
