//! Embedded editor modes for the sheet tokenizer.

mod json_mode;
mod script_mode;

use std::sync::Arc;

use prestige_application::highlight::SheetMode;

pub use json_mode::{JsonMode, JsonState};
pub use script_mode::{ScriptMode, ScriptState};

/// The sheet mode with script and JSON highlighting plugged in.
#[must_use]
pub fn sheet_mode() -> SheetMode {
    SheetMode::new(Arc::new(ScriptMode), Arc::new(JsonMode))
}
