//! Options for exporting an extracted request as a shell command.

use serde::{Deserialize, Serialize};

/// Formatting options for curl export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurlOptions {
    /// Use `--request`/`--header` instead of `-X`/`-H`.
    #[serde(default)]
    pub use_long_flags: bool,
    /// Keep the whole command on one line instead of continuing lines with `\`.
    #[serde(default)]
    pub single_line: bool,
}

impl CurlOptions {
    /// Separator placed before each flag group.
    #[must_use]
    pub const fn line_separator(&self) -> &'static str {
        if self.single_line { " " } else { " \\\n\t" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn separator_depends_on_single_line() {
        assert_eq!(CurlOptions::default().line_separator(), " \\\n\t");
        let options = CurlOptions { single_line: true, ..CurlOptions::default() };
        assert_eq!(options.line_separator(), " ");
    }

    #[test]
    fn deserializes_camel_case_with_defaults() {
        let options: CurlOptions = serde_json::from_str(r#"{"useLongFlags": true}"#).unwrap_or_default();
        assert!(options.use_long_flags);
        assert!(!options.single_line);
    }
}
