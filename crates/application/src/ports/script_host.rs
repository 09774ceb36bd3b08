//! Script host port

use async_trait::async_trait;
use prestige_domain::{ExecutionContext, Value};
use thiserror::Error;

/// Error raised while parsing or running sheet script code.
///
/// The display text is what a user sees, so variants render like the
/// equivalent browser exceptions.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScriptError {
    /// The source could not be parsed.
    #[error("SyntaxError: {message}")]
    Syntax {
        /// What went wrong.
        message: String,
        /// Zero-based line within the evaluated source.
        line: usize,
        /// Zero-based column within that line.
        column: usize,
    },

    /// An identifier was not bound.
    #[error("ReferenceError: {0} is not defined")]
    Reference(String),

    /// An operation was applied to a value of the wrong type.
    #[error("TypeError: {0}")]
    Type(String),

    /// The script threw a value.
    #[error("{0}")]
    Thrown(String),

    /// A host function refused its arguments.
    #[error("{0}")]
    Host(String),
}

/// Port for evaluating script code against an execution context.
///
/// Implementations must complete each call, including anything the code
/// awaits, before returning: the extractor relies on that to run script
/// blocks strictly in document order.
#[async_trait]
pub trait ScriptHost: Send + Sync {
    /// Runs `source` as the body of an async function whose `this` is `context`.
    ///
    /// Returns the value of the first `return` statement reached, or
    /// `undefined`.
    ///
    /// # Errors
    ///
    /// Returns an error if the source does not parse or throws while running.
    async fn evaluate(&self, source: &str, context: &mut ExecutionContext) -> Result<Value, ScriptError>;

    /// Evaluates a single expression with every data bag key bound as a
    /// variable and `this` bound to `context`.
    ///
    /// # Errors
    ///
    /// Returns an error if the expression does not parse or throws.
    async fn evaluate_expression(
        &self,
        expression: &str,
        context: &mut ExecutionContext,
    ) -> Result<Value, ScriptError>;
}
