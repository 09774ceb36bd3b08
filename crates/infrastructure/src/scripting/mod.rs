//! Sheet script engine.
//!
//! Scripts run on an embedded JavaScript engine with `this` bound to the
//! execution context: `data`, `basicAuth`, `authHeader`, `multipart`, `file`
//! and `toast`.

mod context_api;
mod engine;
mod host;
mod names;
mod wire;

pub use context_api::{SCRIPT_LOG_TARGET, basic_auth};
pub use host::SheetScriptHost;
pub(crate) use names::{ATOMS, KEYWORDS, is_ident_char, is_ident_start};
