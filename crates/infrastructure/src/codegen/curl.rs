//! Curl command export.

use std::sync::LazyLock;

use prestige_application::highlight::Style;
use prestige_domain::{CurlOptions, RequestDetails};
use regex::Regex;

static WORD_START: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\b\w").ok());

/// A shell command as styled tokens, ready for display or copying.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedCommand {
    /// Command text split into styled pieces; separators carry no style.
    pub tokens: Vec<(String, Option<Style>)>,
}

impl ExportedCommand {
    /// The command as plain text.
    #[must_use]
    pub fn to_plain_string(&self) -> String {
        self.tokens.iter().map(|(text, _)| text.as_str()).collect()
    }
}

/// Builds a curl command that sends `request`.
#[must_use]
pub fn export_to_curl(request: &RequestDetails, options: &CurlOptions) -> ExportedCommand {
    let separator = options.line_separator();
    let mut command = Builder {
        tokens: vec![("curl".to_string(), Some(Style::Keyword))],
    };
    let (request_flag, header_flag) = if options.use_long_flags {
        ("--request", "--header")
    } else {
        ("-X", "-H")
    };

    command.flag(" ", request_flag, request.method.clone());
    for (name, value) in request.headers.iter() {
        command.flag(
            separator,
            header_flag,
            quote(&format!("{}: {value}", capitalize_words(name))),
        );
    }
    if !request.body.is_empty() {
        command.flag(separator, "--data", quote(&request.body));
    }
    command.push(separator, None);
    command.push(quote(&request.url), Some(Style::String));

    ExportedCommand { tokens: command.tokens }
}

struct Builder {
    tokens: Vec<(String, Option<Style>)>,
}

impl Builder {
    fn push(&mut self, text: impl Into<String>, style: Option<Style>) {
        self.tokens.push((text.into(), style));
    }

    fn flag(&mut self, separator: &str, flag: &str, value: String) {
        self.push(separator, None);
        self.push(flag, Some(Style::Variable));
        self.push(" ", None);
        self.push(value, Some(Style::String));
    }
}

/// Wraps `text` in single quotes for a POSIX shell.
fn quote(text: &str) -> String {
    format!("'{}'", text.replace('\'', r#"'"'"'"#))
}

fn capitalize_words(name: &str) -> String {
    match WORD_START.as_ref() {
        Some(regex) => regex
            .replace_all(name, |caps: &regex::Captures<'_>| caps[0].to_uppercase())
            .into_owned(),
        None => name.to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use prestige_domain::Headers;

    fn request() -> RequestDetails {
        let mut headers = Headers::new();
        headers.append("content-type", "application/json");
        headers.append("x-api-key", "it's");
        RequestDetails {
            method: "POST".into(),
            url: "http://x.test/a?q=1".into(),
            headers,
            body_type: "raw".into(),
            body: r#"{"name":"O'Brien"}"#.into(),
        }
    }

    #[test]
    fn multi_line_short_flags() {
        let command = export_to_curl(&request(), &CurlOptions::default());
        assert_eq!(
            command.to_plain_string(),
            "curl -X POST \\\n\t-H 'Content-Type: application/json' \\\n\t-H 'X-Api-Key: it'\"'\"'s' \\\n\t\
             --data '{\"name\":\"O'\"'\"'Brien\"}' \\\n\t'http://x.test/a?q=1'"
        );
    }

    #[test]
    fn single_line_long_flags_without_body() {
        let mut details = request();
        details.method = "GET".into();
        details.body.clear();
        details.headers = Headers::new();
        let options = CurlOptions {
            use_long_flags: true,
            single_line: true,
        };
        assert_eq!(
            export_to_curl(&details, &options).to_plain_string(),
            "curl --request GET 'http://x.test/a?q=1'"
        );
    }

    #[test]
    fn tokens_carry_styles() {
        let command = export_to_curl(&request(), &CurlOptions::default());
        let styled: Vec<_> = command
            .tokens
            .iter()
            .filter_map(|(text, style)| style.map(|style| (text.as_str(), style)))
            .take(4)
            .collect();
        assert_eq!(
            styled,
            vec![
                ("curl", Style::Keyword),
                ("-X", Style::Variable),
                ("POST", Style::String),
                ("-H", Style::Variable),
            ]
        );
    }
}
