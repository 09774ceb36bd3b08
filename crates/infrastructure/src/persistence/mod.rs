//! Local persistence: user settings and staged files.

mod files;
mod settings_repository;

pub use files::{StagingError, stage_file};
pub use settings_repository::{SettingsError, SettingsRepository, default_settings_path};
