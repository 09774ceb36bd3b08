//! Template interpolation of request preambles.
//!
//! The preamble of a request is treated as the body of a backtick template:
//! literal text is kept (escapes resolved) and every `${ ... }` hole is
//! evaluated by the [`ScriptHost`] with the data bag keys bound as variables.

mod template;

pub use template::{ScannedTemplate, TemplateError, TemplatePart, parse_template, scan_template};

use prestige_domain::ExecutionContext;
use thiserror::Error;

use crate::ports::{ScriptError, ScriptHost};

/// Error raised while interpolating text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InterpolateError {
    /// The template text itself is malformed.
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// A hole expression failed to evaluate.
    #[error(transparent)]
    Script(#[from] ScriptError),
}

/// Renders `text` as a template against `context`.
///
/// Holes are evaluated left to right and converted with JavaScript `String()`
/// semantics, so a hole evaluating to `null` renders as `null`.
///
/// # Errors
///
/// Returns [`InterpolateError::Template`] for malformed template text and
/// [`InterpolateError::Script`] when a hole fails to evaluate.
pub async fn interpolate(
    text: &str,
    context: &mut ExecutionContext,
    host: &dyn ScriptHost,
) -> Result<String, InterpolateError> {
    let parts = parse_template(text)?;
    let mut rendered = String::with_capacity(text.len());

    for part in parts {
        match part {
            TemplatePart::Literal(literal) => rendered.push_str(&literal),
            TemplatePart::Expression { source, .. } => {
                let value = host.evaluate_expression(&source, context).await?;
                rendered.push_str(&value.to_string());
            }
        }
    }

    Ok(rendered)
}
