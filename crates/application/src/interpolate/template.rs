//! Template literal scanning.
//!
//! Splits the body of a backtick template into literal text (with escapes
//! already cooked) and `${ ... }` expression holes. Holes may contain nested
//! braces, quoted strings and nested templates; their source is returned as
//! written for a script host to evaluate.

use thiserror::Error;

/// Error raised for malformed template text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// A backtick ended the template before the end of the text.
    #[error("Unexpected '`' in template at offset {offset}")]
    UnexpectedBacktick {
        /// Byte offset of the backtick.
        offset: usize,
    },

    /// A `${` has no matching `}`.
    #[error("Unterminated template expression at offset {offset}")]
    UnterminatedExpression {
        /// Byte offset of the `${`.
        offset: usize,
    },

    /// A nested template has no closing backtick.
    #[error("Unterminated template literal at offset {offset}")]
    UnterminatedTemplate {
        /// Byte offset of the opening backtick.
        offset: usize,
    },

    /// A backslash is followed by something that is not a valid escape.
    #[error("Invalid escape sequence in template at offset {offset}")]
    InvalidEscape {
        /// Byte offset of the backslash.
        offset: usize,
    },
}

/// A piece of a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplatePart {
    /// Literal text, escapes resolved.
    Literal(String),
    /// Source of a `${ ... }` hole.
    Expression {
        /// Expression source, without the surrounding `${` and `}`.
        source: String,
        /// Byte offset of the source within the scanned text.
        offset: usize,
    },
}

/// Result of scanning a template body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedTemplate {
    /// Parts in order.
    pub parts: Vec<TemplatePart>,
    /// Offset of the closing backtick, or `None` if the text ran out first.
    pub closed_at: Option<usize>,
}

struct Cursor<'a> {
    src: &'a str,
    pos: usize,
}

impl Cursor<'_> {
    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }
}

/// Scans a template body that starts at byte `start` of `src`.
///
/// Scanning stops at the first unescaped backtick outside any hole, or at
/// the end of `src`.
///
/// # Errors
///
/// Returns an error for unterminated holes, unterminated nested templates
/// and invalid escapes.
pub fn scan_template(src: &str, start: usize) -> Result<ScannedTemplate, TemplateError> {
    let mut cursor = Cursor { src, pos: start };
    let mut parts = Vec::new();
    let mut literal = String::new();
    let mut closed_at = None;

    while let Some(ch) = cursor.bump() {
        match ch {
            '`' => {
                closed_at = Some(cursor.pos - 1);
                break;
            }
            '\\' => cook_escape(&mut cursor, &mut literal)?,
            '$' if cursor.peek() == Some('{') => {
                let hole = cursor.pos - 1;
                cursor.bump();
                let source_start = cursor.pos;
                let source_end = skip_hole(&mut cursor, hole)?;
                if !literal.is_empty() {
                    parts.push(TemplatePart::Literal(std::mem::take(&mut literal)));
                }
                parts.push(TemplatePart::Expression {
                    source: src[source_start..source_end].to_string(),
                    offset: source_start,
                });
            }
            _ => literal.push(ch),
        }
    }

    if !literal.is_empty() {
        parts.push(TemplatePart::Literal(literal));
    }
    Ok(ScannedTemplate { parts, closed_at })
}

/// Parses `text` as a complete template body.
///
/// # Errors
///
/// Besides the errors of [`scan_template`], a bare backtick anywhere in the
/// text is rejected.
pub fn parse_template(text: &str) -> Result<Vec<TemplatePart>, TemplateError> {
    let scanned = scan_template(text, 0)?;
    match scanned.closed_at {
        Some(offset) => Err(TemplateError::UnexpectedBacktick { offset }),
        None => Ok(scanned.parts),
    }
}

/// Advances past the closing `}` of a hole; returns the offset of that `}`.
fn skip_hole(cursor: &mut Cursor<'_>, hole: usize) -> Result<usize, TemplateError> {
    let mut depth = 0usize;
    loop {
        let Some(ch) = cursor.bump() else {
            return Err(TemplateError::UnterminatedExpression { offset: hole });
        };
        match ch {
            '{' => depth += 1,
            '}' if depth == 0 => return Ok(cursor.pos - 1),
            '}' => depth -= 1,
            '\'' | '"' => skip_quoted(cursor, ch, hole)?,
            '`' => {
                let opening = cursor.pos - 1;
                let nested = scan_template(cursor.src, cursor.pos)?;
                let Some(close) = nested.closed_at else {
                    return Err(TemplateError::UnterminatedTemplate { offset: opening });
                };
                cursor.pos = close + 1;
            }
            '/' if cursor.eat('/') => {
                while cursor.peek().is_some_and(|c| c != '\n') {
                    cursor.bump();
                }
            }
            '/' if cursor.eat('*') => loop {
                match cursor.bump() {
                    None => return Err(TemplateError::UnterminatedExpression { offset: hole }),
                    Some('*') if cursor.eat('/') => break,
                    Some(_) => {}
                }
            },
            _ => {}
        }
    }
}

fn skip_quoted(cursor: &mut Cursor<'_>, quote: char, hole: usize) -> Result<(), TemplateError> {
    loop {
        match cursor.bump() {
            None => return Err(TemplateError::UnterminatedExpression { offset: hole }),
            Some('\\') => {
                cursor.bump();
            }
            Some(ch) if ch == quote => return Ok(()),
            Some(_) => {}
        }
    }
}

fn cook_escape(cursor: &mut Cursor<'_>, out: &mut String) -> Result<(), TemplateError> {
    let offset = cursor.pos - 1;
    let invalid = TemplateError::InvalidEscape { offset };
    let Some(ch) = cursor.bump() else {
        return Err(invalid);
    };
    match ch {
        'n' => out.push('\n'),
        'r' => out.push('\r'),
        't' => out.push('\t'),
        'b' => out.push('\u{8}'),
        'f' => out.push('\u{c}'),
        'v' => out.push('\u{b}'),
        '0' if !cursor.peek().is_some_and(|c| c.is_ascii_digit()) => out.push('\0'),
        '0'..='9' => return Err(invalid),
        '\n' => {}
        '\r' => {
            cursor.eat('\n');
        }
        'x' => {
            let code = read_hex(cursor, 2).ok_or(invalid.clone())?;
            out.push(char::from_u32(code).ok_or(invalid)?);
        }
        'u' => {
            let code = if cursor.eat('{') {
                let digits_start = cursor.pos;
                while cursor.peek().is_some_and(|c| c.is_ascii_hexdigit()) {
                    cursor.bump();
                }
                let digits = &cursor.src[digits_start..cursor.pos];
                if digits.is_empty() || !cursor.eat('}') {
                    return Err(invalid);
                }
                u32::from_str_radix(digits, 16).ok()
            } else {
                read_hex(cursor, 4)
            };
            out.push(code.and_then(char::from_u32).ok_or(invalid)?);
        }
        other => out.push(other),
    }
    Ok(())
}

fn read_hex(cursor: &mut Cursor<'_>, len: usize) -> Option<u32> {
    let start = cursor.pos;
    for _ in 0..len {
        if !cursor.peek().is_some_and(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        cursor.bump();
    }
    u32::from_str_radix(&cursor.src[start..cursor.pos], 16).ok()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lit(s: &str) -> TemplatePart {
        TemplatePart::Literal(s.to_string())
    }

    fn expr(s: &str, offset: usize) -> TemplatePart {
        TemplatePart::Expression {
            source: s.to_string(),
            offset,
        }
    }

    #[test]
    fn plain_text_is_one_literal() {
        assert_eq!(parse_template("GET http://x.test").unwrap(), vec![lit("GET http://x.test")]);
        assert_eq!(parse_template("").unwrap(), vec![]);
    }

    #[test]
    fn holes_are_split_out() {
        assert_eq!(
            parse_template("Hello ${ x } and ${y.d}").unwrap(),
            vec![lit("Hello "), expr(" x ", 8), lit(" and "), expr("y.d", 19)]
        );
    }

    #[test]
    fn nested_template_inside_hole() {
        let text = "Hello ${ `[${this.greeting}]` }";
        assert_eq!(
            parse_template(text).unwrap(),
            vec![lit("Hello "), expr(" `[${this.greeting}]` ", 8)]
        );
    }

    #[test]
    fn braces_and_strings_inside_hole() {
        let parts = parse_template(r#"${ {a: "}"}.a }!"#).unwrap();
        assert_eq!(parts, vec![expr(r#" {a: "}"}.a "#, 2), lit("!")]);
    }

    #[test]
    fn dollar_without_brace_is_literal() {
        assert_eq!(parse_template("cost: $5 {x}").unwrap(), vec![lit("cost: $5 {x}")]);
    }

    #[test]
    fn escapes_are_cooked() {
        assert_eq!(
            parse_template(r"a\nb\t\`\${x}\\ \x41B\u{1F600}\q").unwrap(),
            vec![lit("a\nb\t`${x}\\ AB\u{1F600}q")]
        );
    }

    #[test]
    fn bare_backtick_is_rejected() {
        assert_eq!(
            parse_template("say `hi`"),
            Err(TemplateError::UnexpectedBacktick { offset: 4 })
        );
    }

    #[test]
    fn unterminated_hole_is_rejected() {
        assert_eq!(
            parse_template("x ${ a + "),
            Err(TemplateError::UnterminatedExpression { offset: 2 })
        );
        assert_eq!(
            parse_template("${ `abc }"),
            Err(TemplateError::UnterminatedTemplate { offset: 3 })
        );
    }

    #[test]
    fn bad_escapes_are_rejected() {
        assert_eq!(parse_template(r"\x4"), Err(TemplateError::InvalidEscape { offset: 0 }));
        assert_eq!(parse_template(r"ok \1"), Err(TemplateError::InvalidEscape { offset: 3 }));
        assert_eq!(parse_template("\\"), Err(TemplateError::InvalidEscape { offset: 0 }));
    }

    #[test]
    fn scan_reports_closing_backtick() {
        let src = "`a${1}b` + 1";
        let scanned = scan_template(src, 1).unwrap();
        assert_eq!(scanned.closed_at, Some(7));
        assert_eq!(scanned.parts, vec![lit("a"), expr("1", 4), lit("b")]);
    }
}
