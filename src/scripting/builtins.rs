// Sat Oct 17 2026 - Alex

use crate::scripting::api::Capability;
use boa_engine::object::ObjectInitializer;
use boa_engine::property::Attribute;
use boa_engine::{js_string, Context, JsObject, JsResult, JsValue, NativeFunction};
use log::Level;

/// Log target used for everything a script prints through `console`.
pub const CONSOLE_TARGET: &str = "console";

/// Global `console` object forwarding to the diagnostics sink.
pub struct ConsoleCapability;

impl Capability for ConsoleCapability {
    fn name(&self) -> &'static str {
        "console"
    }

    fn install(&self, context: &mut Context) -> JsResult<()> {
        let console = build_console(context);
        context.register_global_property(
            js_string!("console"),
            console,
            Attribute::WRITABLE | Attribute::CONFIGURABLE,
        )
    }
}

fn build_console(context: &mut Context) -> JsObject {
    ObjectInitializer::new(context)
        .function(NativeFunction::from_fn_ptr(console_log), js_string!("log"), 0)
        .function(NativeFunction::from_fn_ptr(console_info), js_string!("info"), 0)
        .function(NativeFunction::from_fn_ptr(console_warn), js_string!("warn"), 0)
        .function(NativeFunction::from_fn_ptr(console_error), js_string!("error"), 0)
        .function(NativeFunction::from_fn_ptr(console_debug), js_string!("debug"), 0)
        .function(NativeFunction::from_fn_ptr(console_trace), js_string!("trace"), 0)
        .build()
}

/// Joins console arguments with spaces; strings verbatim, anything else in display form.
pub fn format_console_args(args: &[JsValue]) -> String {
    args.iter()
        .map(|arg| match arg.as_string() {
            Some(s) => s.to_std_string_escaped(),
            None => arg.display().to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn emit(level: Level, args: &[JsValue]) -> JsResult<JsValue> {
    log::log!(target: CONSOLE_TARGET, level, "{}", format_console_args(args));
    Ok(JsValue::undefined())
}

fn console_log(_this: &JsValue, args: &[JsValue], _context: &mut Context) -> JsResult<JsValue> {
    emit(Level::Info, args)
}

fn console_info(_this: &JsValue, args: &[JsValue], _context: &mut Context) -> JsResult<JsValue> {
    emit(Level::Info, args)
}

fn console_warn(_this: &JsValue, args: &[JsValue], _context: &mut Context) -> JsResult<JsValue> {
    emit(Level::Warn, args)
}

fn console_error(_this: &JsValue, args: &[JsValue], _context: &mut Context) -> JsResult<JsValue> {
    emit(Level::Error, args)
}

fn console_debug(_this: &JsValue, args: &[JsValue], _context: &mut Context) -> JsResult<JsValue> {
    emit(Level::Debug, args)
}

fn console_trace(_this: &JsValue, args: &[JsValue], _context: &mut Context) -> JsResult<JsValue> {
    emit(Level::Trace, args)
}
