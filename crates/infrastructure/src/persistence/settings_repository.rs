//! User settings persistence.
//!
//! Settings live in the platform config directory unless a path is given:
//! - Linux: ~/.config/prestige/settings.json
//! - macOS: ~/Library/Application Support/prestige/settings.json
//! - Windows: %APPDATA%/prestige/settings.json

use std::path::{Path, PathBuf};

use prestige_domain::Settings;
use tokio::fs;
use tracing::debug;

use crate::serialization::{SerializationError, from_json_bytes, to_json_stable_bytes};

/// Error type for settings operations.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// IO error during file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] SerializationError),

    /// Could not determine config directory.
    #[error("Could not determine config directory")]
    NoConfigDir,
}

/// Repository for user settings persistence.
#[derive(Debug, Clone, Default)]
pub struct SettingsRepository {
    path: Option<PathBuf>,
}

impl SettingsRepository {
    /// Creates a repository backed by the default settings file.
    #[must_use]
    pub fn new() -> Self {
        Self {
            path: default_settings_path(),
        }
    }

    /// Creates a repository backed by an explicit file.
    #[must_use]
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: Some(path.into()) }
    }

    /// The settings file, if one could be determined.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Loads settings; a missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub async fn load(&self) -> Result<Settings, SettingsError> {
        let Some(path) = &self.path else {
            return Ok(Settings::default());
        };

        if !fs::try_exists(path).await? {
            debug!(path = %path.display(), "no settings file, using defaults");
            return Ok(Settings::default());
        }

        let content = fs::read(path).await?;
        Ok(from_json_bytes(&content)?)
    }

    /// Saves settings, creating the parent directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no config directory or writing fails.
    pub async fn save(&self, settings: &Settings) -> Result<(), SettingsError> {
        let Some(path) = &self.path else {
            return Err(SettingsError::NoConfigDir);
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        fs::write(path, to_json_stable_bytes(settings)?).await?;
        Ok(())
    }
}

/// Default location of the settings file.
#[must_use]
pub fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("prestige").join("settings.json"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use prestige_domain::{OutputFormat, Value};
    use tempfile::TempDir;

    #[test]
    fn default_path_is_under_prestige_dir() {
        if let Some(path) = default_settings_path() {
            assert!(path.ends_with("prestige/settings.json"));
        }
    }

    #[tokio::test]
    async fn missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let repo = SettingsRepository::with_path(dir.path().join("absent.json"));
        assert_eq!(repo.load().await.unwrap(), Settings::default());
    }

    #[tokio::test]
    async fn save_then_load() {
        let dir = TempDir::new().unwrap();
        let repo = SettingsRepository::with_path(dir.path().join("nested").join("settings.json"));

        let mut settings = Settings::default();
        settings.output = OutputFormat::Curl;
        settings.curl.single_line = true;
        settings.data.insert("host".into(), serde_json::json!("api.test"));
        repo.save(&settings).await.unwrap();

        let loaded = repo.load().await.unwrap();
        assert_eq!(loaded, settings);
        assert_eq!(loaded.initial_data(), vec![("host".to_string(), Value::from("api.test"))]);

        let text = std::fs::read_to_string(repo.path().unwrap()).unwrap();
        assert!(text.contains("\"singleLine\": true"));
        assert!(text.ends_with('\n'));
    }

    #[tokio::test]
    async fn invalid_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();
        let err = SettingsRepository::with_path(path).load().await.unwrap_err();
        assert!(matches!(err, SettingsError::Serialization(_)));
    }
}
