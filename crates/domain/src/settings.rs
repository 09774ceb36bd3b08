//! User settings for the command-line front end.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::codegen::CurlOptions;
use crate::value::Value;

/// How an extracted request is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// The request as a JSON document.
    #[default]
    Json,
    /// An equivalent curl command.
    Curl,
}

/// Persisted user settings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Default output format for `extract`.
    #[serde(default)]
    pub output: OutputFormat,

    /// Curl export formatting.
    #[serde(default)]
    pub curl: CurlOptions,

    /// Initial data bag entries, available to every sheet.
    #[serde(default)]
    pub data: IndexMap<String, serde_json::Value>,
}

impl Settings {
    /// Converts the configured data entries into script values.
    #[must_use]
    pub fn initial_data(&self) -> Vec<(String, Value)> {
        self.data
            .iter()
            .map(|(key, value)| (key.clone(), Value::from_json(value.clone())))
            .collect()
    }
}
