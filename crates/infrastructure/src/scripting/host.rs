//! Script host backed by the embedded JavaScript engine.

use async_trait::async_trait;
use prestige_application::{ScriptError, ScriptHost, SyntaxChecker, SyntaxIssue};
use prestige_domain::{ExecutionContext, Value};
use tracing::debug;

use super::context_api::SCRIPT_LOG_TARGET;
use super::engine::{check_script, run_expression, run_script};

/// Runs sheet scripts in process.
///
/// Each call gets its own engine and drains the engine's job queue before
/// returning, so awaited work completes and blocks run strictly in document
/// order.
#[derive(Debug, Clone, Copy, Default)]
pub struct SheetScriptHost;

impl SheetScriptHost {
    /// Creates a script host.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ScriptHost for SheetScriptHost {
    async fn evaluate(&self, source: &str, context: &mut ExecutionContext) -> Result<Value, ScriptError> {
        debug!(target: SCRIPT_LOG_TARGET, lines = source.lines().count(), "running script block");
        run_script(source, context)
    }

    async fn evaluate_expression(
        &self,
        expression: &str,
        context: &mut ExecutionContext,
    ) -> Result<Value, ScriptError> {
        run_expression(expression, context)
    }
}

impl SyntaxChecker for SheetScriptHost {
    fn check(&self, source: &str) -> Result<(), SyntaxIssue> {
        check_script(source)
    }
}
