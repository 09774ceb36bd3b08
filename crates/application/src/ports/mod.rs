//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the sheet engine and the script
//! engine or editor modes plugged into it. Each port is a trait implemented
//! by adapters in the infrastructure layer.

mod script_host;
mod syntax_checker;

pub use script_host::{ScriptError, ScriptHost};
pub use syntax_checker::{SyntaxChecker, SyntaxIssue};
