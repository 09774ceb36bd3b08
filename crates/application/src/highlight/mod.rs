//! Line-by-line tokenizer for editor syntax highlighting.
//!
//! The sheet mode recognizes the same markers as the block parser and hands
//! script blocks and request bodies to embedded modes. Its state is carried
//! from line to line so an editor can resume from any line.

mod highlighter;
mod mode;
mod sheet_mode;
mod stream;

pub use highlighter::SheetHighlighter;
pub use mode::{EmbeddedMode, ModeKind, ModeState, Style, Token};
pub use sheet_mode::{EmbeddedState, SheetContext, SheetMode, SheetState};
pub use stream::LineStream;
