//! JSON highlighting for request bodies.

use prestige_application::highlight::{EmbeddedMode, LineStream, ModeKind, ModeState, Style};

/// JSON keeps no state between lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct JsonState;

/// Tokenizes JSON payloads.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonMode;

impl EmbeddedMode for JsonMode {
    fn kind(&self) -> ModeKind {
        ModeKind::Json
    }

    fn start_state(&self) -> Box<dyn ModeState> {
        Box::new(JsonState)
    }

    fn token(&self, stream: &mut LineStream<'_>, _state: &mut dyn ModeState) -> Option<Style> {
        if stream.eat_space() {
            return None;
        }

        match stream.next_char()? {
            '"' => {
                let mut escaped = false;
                stream.eat_while(|c| {
                    let more = escaped || c != '"';
                    escaped = !escaped && c == '\\';
                    more
                });
                if !stream.eat('"') {
                    return Some(Style::Error);
                }
                if stream.rest().trim_start().starts_with(':') {
                    Some(Style::Property)
                } else {
                    Some(Style::String)
                }
            }
            c if c == '-' || c.is_ascii_digit() => {
                stream.eat_while(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'));
                Some(Style::Number)
            }
            c if c.is_ascii_alphabetic() => {
                stream.eat_while(|c| c.is_ascii_alphanumeric());
                if matches!(stream.current(), "true" | "false" | "null") {
                    Some(Style::Atom)
                } else {
                    Some(Style::Error)
                }
            }
            '{' | '}' | '[' | ']' | ',' | ':' => None,
            _ => Some(Style::Error),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn styled(line: &str) -> Vec<(String, &'static str)> {
        let mut state = JsonMode.start_state();
        let mut stream = LineStream::new(line);
        let mut tokens = Vec::new();
        while !stream.eol() {
            stream.start_token();
            if let Some(style) = JsonMode.token(&mut stream, state.as_mut()) {
                tokens.push((stream.current().to_string(), style.as_str()));
            }
        }
        tokens
    }

    fn owned(expected: &[(&str, &'static str)]) -> Vec<(String, &'static str)> {
        expected.iter().map(|(text, style)| ((*text).to_string(), *style)).collect()
    }

    #[test]
    fn keys_values_and_atoms() {
        assert_eq!(
            styled(r#"{ "name" : "sher\"lock", "age": -4.5e2, "ok": true, "x": null }"#),
            owned(&[
                (r#""name""#, "property"),
                (r#""sher\"lock""#, "string"),
                (r#""age""#, "property"),
                ("-4.5e2", "number"),
                (r#""ok""#, "property"),
                ("true", "atom"),
                (r#""x""#, "property"),
                ("null", "atom"),
            ])
        );
    }

    #[test]
    fn stray_text_is_an_error() {
        assert_eq!(
            styled(r#"[yes, 'no', "open"#),
            owned(&[("yes", "error"), ("'", "error"), ("no", "error"), ("'", "error"), (r#""open"#, "error")])
        );
    }
}
