// Sat Oct 17 2026 - Alex

use boa_engine::{js_string, Context, JsError, JsNativeError, JsResult, JsString, JsValue};

/// A host facility attached to the global scope when an environment is built.
pub trait Capability {
    fn name(&self) -> &'static str;

    fn install(&self, context: &mut Context) -> JsResult<()>;
}

/// Capabilities installed, in order, into a fresh environment.
#[derive(Default)]
pub struct CapabilitySet {
    capabilities: Vec<Box<dyn Capability>>,
}

impl CapabilitySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with<C: Capability + 'static>(mut self, capability: C) -> Self {
        self.capabilities.push(Box::new(capability));
        self
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.capabilities.iter().map(|c| c.name()).collect()
    }

    pub fn install_all(&self, context: &mut Context) -> JsResult<()> {
        for capability in &self.capabilities {
            capability.install(context)?;
            log::trace!(capability = capability.name(); "installed capability");
        }
        Ok(())
    }
}

/// Calls `JSON.<method>(arg)` through the interpreter's own global.
pub fn json_call(method: &str, arg: &JsValue, context: &mut Context) -> JsResult<JsValue> {
    let json = context.global_object().get(js_string!("JSON"), context)?;
    let json = json
        .as_object()
        .cloned()
        .ok_or_else(|| JsNativeError::typ().with_message("JSON is not an object"))?;

    let function = json.get(JsString::from(method), context)?;
    let function = function
        .as_callable()
        .cloned()
        .ok_or_else(|| JsNativeError::typ().with_message(format!("JSON.{} is not callable", method)))?;

    function.call(&JsValue::from(json), std::slice::from_ref(arg), context)
}

/// Human-readable text for an interpreter error, e.g. `TypeError: x is not a function`.
pub fn describe_error(err: JsError, context: &mut Context) -> String {
    match err.try_native(context) {
        Ok(native) => native.to_string(),
        Err(_) => err.to_string(),
    }
}
