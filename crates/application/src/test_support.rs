//! Test doubles shared by the unit tests of this crate.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use prestige_domain::{ExecutionContext, Value};

use crate::ports::{ScriptError, ScriptHost, SyntaxChecker, SyntaxIssue};

type Handler = Box<dyn Fn(&mut ExecutionContext) -> Result<Value, ScriptError> + Send + Sync>;

/// A script host that answers from a table of canned sources.
///
/// Expressions not in the table are looked up as dotted paths in the data
/// bag. Every call is recorded.
#[derive(Default)]
pub struct ScriptedHost {
    scripts: HashMap<String, Handler>,
    expressions: HashMap<String, Handler>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_script(
        mut self,
        source: &str,
        handler: impl Fn(&mut ExecutionContext) -> Result<Value, ScriptError> + Send + Sync + 'static,
    ) -> Self {
        self.scripts.insert(source.to_string(), Box::new(handler));
        self
    }

    pub fn on_expression(
        mut self,
        source: &str,
        handler: impl Fn(&mut ExecutionContext) -> Result<Value, ScriptError> + Send + Sync + 'static,
    ) -> Self {
        self.expressions.insert(source.to_string(), Box::new(handler));
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }

    fn record(&self, source: &str) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(source.to_string());
        }
    }
}

#[async_trait]
impl ScriptHost for ScriptedHost {
    async fn evaluate(&self, source: &str, context: &mut ExecutionContext) -> Result<Value, ScriptError> {
        self.record(source);
        match self.scripts.get(source) {
            Some(handler) => handler(context),
            None => Err(ScriptError::Thrown(format!("unexpected script: {source}"))),
        }
    }

    async fn evaluate_expression(
        &self,
        expression: &str,
        context: &mut ExecutionContext,
    ) -> Result<Value, ScriptError> {
        self.record(expression);
        if let Some(handler) = self.expressions.get(expression) {
            return handler(context);
        }
        let mut path = expression.trim().split('.');
        let root = path.next().unwrap_or_default();
        let Some(mut value) = context.data.get(root).cloned() else {
            return Err(ScriptError::Reference(root.to_string()));
        };
        for key in path {
            value = value.property(key);
        }
        Ok(value)
    }
}

/// A checker that rejects any source containing `!!!` at that position.
pub struct MarkerChecker;

impl SyntaxChecker for MarkerChecker {
    fn check(&self, source: &str) -> Result<(), SyntaxIssue> {
        for (line, text) in source.lines().enumerate() {
            if let Some(column) = text.find("!!!") {
                return Err(SyntaxIssue {
                    message: "Unexpected token '!!!'".to_string(),
                    line,
                    column,
                });
            }
        }
        Ok(())
    }
}
