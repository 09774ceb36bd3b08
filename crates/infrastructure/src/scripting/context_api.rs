//! Native functions behind `this.basicAuth` and `console`.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use boa_engine::object::ObjectInitializer;
use boa_engine::property::Attribute;
use boa_engine::{Context, JsArgs, JsResult, JsString, JsValue, NativeFunction, js_string};
use tracing::{debug, error, info, warn};

/// Log target of `console.*` output.
pub const SCRIPT_LOG_TARGET: &str = "prestige::script";

/// `Basic <base64(user:pass)>`
pub fn basic_auth(user: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{user}:{password}")))
}

/// Registers the natives the prelude and scripts rely on.
pub(crate) fn install_natives(context: &mut Context) -> JsResult<()> {
    context.register_global_callable(
        js_string!("__sheetBasicAuth"),
        2,
        NativeFunction::from_fn_ptr(basic_auth_native),
    )?;

    let console = ObjectInitializer::new(context)
        .function(NativeFunction::from_fn_ptr(console_info), js_string!("log"), 0)
        .function(NativeFunction::from_fn_ptr(console_info), js_string!("info"), 0)
        .function(NativeFunction::from_fn_ptr(console_warn), js_string!("warn"), 0)
        .function(NativeFunction::from_fn_ptr(console_error), js_string!("error"), 0)
        .function(NativeFunction::from_fn_ptr(console_debug), js_string!("debug"), 0)
        .build();
    context.register_global_property(js_string!("console"), console, Attribute::all())
}

fn arg_string(args: &[JsValue], index: usize, context: &mut Context) -> JsResult<String> {
    Ok(args.get_or_undefined(index).to_string(context)?.to_std_string_escaped())
}

fn basic_auth_native(_this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
    let user = arg_string(args, 0, context)?;
    let password = arg_string(args, 1, context)?;
    Ok(JsValue::from(JsString::from(basic_auth(&user, &password).as_str())))
}

fn console_line(args: &[JsValue], context: &mut Context) -> JsResult<String> {
    let parts = (0..args.len())
        .map(|index| arg_string(args, index, context))
        .collect::<JsResult<Vec<_>>>()?;
    Ok(parts.join(" "))
}

fn console_info(_this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
    let line = console_line(args, context)?;
    info!(target: SCRIPT_LOG_TARGET, "{line}");
    Ok(JsValue::undefined())
}

fn console_warn(_this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
    let line = console_line(args, context)?;
    warn!(target: SCRIPT_LOG_TARGET, "{line}");
    Ok(JsValue::undefined())
}

fn console_error(_this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
    let line = console_line(args, context)?;
    error!(target: SCRIPT_LOG_TARGET, "{line}");
    Ok(JsValue::undefined())
}

fn console_debug(_this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
    let line = console_line(args, context)?;
    debug!(target: SCRIPT_LOG_TARGET, "{line}");
    Ok(JsValue::undefined())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use boa_engine::Source;
    use pretty_assertions::assert_eq;

    fn eval_string(context: &mut Context, code: &str) -> String {
        let value = context.eval(Source::from_bytes(code)).unwrap();
        value.to_string(context).unwrap().to_std_string_escaped()
    }

    #[test]
    fn basic_auth_header() {
        assert_eq!(basic_auth("user", "pass"), "Basic dXNlcjpwYXNz");
    }

    #[test]
    fn natives_are_callable_from_scripts() {
        let mut context = Context::default();
        install_natives(&mut context).unwrap();

        assert_eq!(eval_string(&mut context, "__sheetBasicAuth('user', 'pass')"), "Basic dXNlcjpwYXNz");
        assert_eq!(eval_string(&mut context, "__sheetBasicAuth(1)"), "Basic MTp1bmRlZmluZWQ=");
        assert_eq!(eval_string(&mut context, "console.log('a', 1, {}); typeof console.warn"), "function");
    }
}
