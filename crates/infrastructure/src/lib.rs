//! Prestige Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports defined in the
//! application layer: the sheet script engine, embedded highlighting modes,
//! curl export and local persistence.

pub mod codegen;
pub mod highlight;
pub mod persistence;
pub mod scripting;
pub mod serialization;

pub use codegen::{ExportedCommand, export_to_curl};
pub use highlight::{JsonMode, ScriptMode, sheet_mode};
pub use persistence::{SettingsError, SettingsRepository, StagingError, default_settings_path, stage_file};
pub use scripting::{SCRIPT_LOG_TARGET, SheetScriptHost, basic_auth};
pub use serialization::{SerializationError, from_json_bytes, to_json_stable, to_json_stable_bytes};
