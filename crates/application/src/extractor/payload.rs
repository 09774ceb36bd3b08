//! Request body rendering.

use prestige_domain::{BODY_TYPE_MULTIPART, ExecutionContext, RequestDetails, Value};
use tracing::debug;

use crate::error::ExtractResult;
use crate::ports::ScriptHost;

/// Fills the body of `details` from the payload lines.
///
/// A payload whose first line starts with `=` is an expression: it is
/// evaluated and the result decides body and content type. Any other payload
/// is sent as written. The body is trimmed either way.
pub(super) async fn render_payload(
    lines: &[&str],
    details: &mut RequestDetails,
    context: &mut ExecutionContext,
    host: &dyn ScriptHost,
) -> ExtractResult<()> {
    let text = lines.join("\n");

    let body = match text.strip_prefix('=') {
        Some(expression) => {
            let value = host.evaluate(&format!("return {expression}"), context).await?;
            debug!(kind = value.type_name(), "payload expression evaluated");
            body_from_value(value, details)
        }
        None => text,
    };

    details.body = body.trim().to_string();
    Ok(())
}

fn body_from_value(value: Value, details: &mut RequestDetails) -> String {
    match value {
        Value::String(body) => body,
        Value::Null | Value::Undefined => String::new(),
        form @ Value::Multipart(_) => {
            details.body_type = BODY_TYPE_MULTIPART.to_string();
            details.headers.set("Content-Type", BODY_TYPE_MULTIPART);
            form.to_json_string().unwrap_or_default()
        }
        other => {
            details.headers.set("Content-Type", "application/json");
            other.to_json_string().unwrap_or_default()
        }
    }
}
