//! Console API implementation.
//!
//! [Console Standard](https://console.spec.whatwg.org/)
//!
//! Script output goes to `tracing` under the `mimic::console` target, so the
//! embedding application decides where it ends up.

use boa_engine::{
    Context, JsResult, JsValue, NativeFunction, js_string, object::ObjectInitializer, property::Attribute,
};

/// Target of every event emitted by `console` methods.
pub const TARGET: &str = "mimic::console";

/// Register the console global object on the context.
///
/// [§ 1.1 Logging](https://console.spec.whatwg.org/#logging)
///
/// - `console.log(...args)` and `console.info(...args)` log at `INFO`
/// - `console.debug(...args)` logs at `DEBUG`
/// - `console.warn(...args)` logs at `WARN`
/// - `console.error(...args)` logs at `ERROR`
pub(super) fn register_console(context: &mut Context) -> JsResult<()> {
    let console = ObjectInitializer::new(context)
        .function(NativeFunction::from_copy_closure(console_log), js_string!("log"), 0)
        .function(NativeFunction::from_copy_closure(console_log), js_string!("info"), 0)
        .function(NativeFunction::from_copy_closure(console_debug), js_string!("debug"), 0)
        .function(NativeFunction::from_copy_closure(console_warn), js_string!("warn"), 0)
        .function(NativeFunction::from_copy_closure(console_error), js_string!("error"), 0)
        .build();

    context.register_global_property(js_string!("console"), console, Attribute::all())
}

/// `console.log(...args)`
///
/// [§ 1.1.6 log](https://console.spec.whatwg.org/#log)
///
/// "Perform Logger("log", data)."
fn console_log(_this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
    let output = format_console_args(args, context)?;
    tracing::info!(target: TARGET, "{output}");
    Ok(JsValue::undefined())
}

/// [§ 1.1.2 debug](https://console.spec.whatwg.org/#debug)
fn console_debug(_this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
    let output = format_console_args(args, context)?;
    tracing::debug!(target: TARGET, "{output}");
    Ok(JsValue::undefined())
}

/// [§ 1.1.9 warn](https://console.spec.whatwg.org/#warn)
fn console_warn(_this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
    let output = format_console_args(args, context)?;
    tracing::warn!(target: TARGET, "{output}");
    Ok(JsValue::undefined())
}

/// [§ 1.1.3 error](https://console.spec.whatwg.org/#error)
fn console_error(_this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
    let output = format_console_args(args, context)?;
    tracing::error!(target: TARGET, "{output}");
    Ok(JsValue::undefined())
}

/// Format console arguments for output.
///
/// [§ 2.1 Formatter](https://console.spec.whatwg.org/#formatter)
///
/// Converts each argument to a string and joins them with spaces.
fn format_console_args(args: &[JsValue], context: &mut Context) -> JsResult<String> {
    let strings: Result<Vec<String>, _> = args
        .iter()
        .map(|arg| arg.to_string(context).map(|s| s.to_std_string_escaped()))
        .collect();

    Ok(strings?.join(" "))
}
