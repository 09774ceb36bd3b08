//! Prestige Application - Sheet engine
//!
//! This crate holds the parts of Prestige that work on sheet text:
//! - The block parser that splits a sheet into requests and scripts
//! - The request extractor that turns a block into [`RequestDetails`]
//! - Template interpolation of request preambles
//! - The line tokenizer behind editor highlighting, and the linter
//! - Port traits for the script engine and editor modes
//!
//! [`RequestDetails`]: prestige_domain::RequestDetails

pub mod error;
pub mod extractor;
pub mod highlight;
pub mod interpolate;
pub mod lint;
pub mod parser;
pub mod ports;

#[cfg(test)]
mod test_support;

pub use error::{ExtractError, ExtractResult};
pub use extractor::{ExecutionPlan, encode_uri_component, extract_request, plan_execution};
pub use highlight::{EmbeddedMode, LineStream, ModeKind, ModeState, SheetHighlighter, SheetMode, SheetState, Style, Token};
pub use interpolate::{InterpolateError, TemplateError, interpolate};
pub use lint::{Diagnostic, Severity, lint};
pub use parser::{parse, parse_text};
pub use ports::{ScriptError, ScriptHost, SyntaxChecker, SyntaxIssue};
