//! Shell command export of extracted requests.

mod curl;

pub use curl::{ExportedCommand, export_to_curl};
