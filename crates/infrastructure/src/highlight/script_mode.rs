//! Script highlighting for `### javascript` blocks and `=` payloads.

use prestige_application::highlight::{EmbeddedMode, LineStream, ModeKind, ModeState, Style};

use crate::scripting::{ATOMS, KEYWORDS, is_ident_char, is_ident_start};

const OPERATOR_CHARS: &str = "+-*/%=<>!&|?:^~";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Region {
    Code,
    BlockComment,
    Template,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Brace {
    Block,
    /// Closes a `${` hole and resumes the template.
    Hole,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Previous {
    Other,
    Dot,
    Declaration,
}

/// Line-to-line state of [`ScriptMode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptState {
    region: Region,
    braces: Vec<Brace>,
    previous: Previous,
}

impl Default for ScriptState {
    fn default() -> Self {
        Self {
            region: Region::Code,
            braces: Vec::new(),
            previous: Previous::Other,
        }
    }
}

/// Tokenizes script code, including comments and template literals that span lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScriptMode;

impl EmbeddedMode for ScriptMode {
    fn kind(&self) -> ModeKind {
        ModeKind::Script
    }

    fn start_state(&self) -> Box<dyn ModeState> {
        Box::new(ScriptState::default())
    }

    fn token(&self, stream: &mut LineStream<'_>, state: &mut dyn ModeState) -> Option<Style> {
        let Some(state) = state.as_any_mut().downcast_mut::<ScriptState>() else {
            stream.skip_to_end();
            return Some(Style::Error);
        };
        match state.region {
            Region::BlockComment => block_comment(stream, state),
            Region::Template => template(stream, state),
            Region::Code => code(stream, state),
        }
    }
}

fn code(stream: &mut LineStream<'_>, state: &mut ScriptState) -> Option<Style> {
    if stream.eat_space() {
        return None;
    }

    if stream.match_str("/*") {
        state.region = Region::BlockComment;
        return block_comment(stream, state);
    }
    if stream.match_str("//") {
        stream.skip_to_end();
        return Some(Style::Comment);
    }

    let previous = std::mem::replace(&mut state.previous, Previous::Other);
    let ch = stream.next_char()?;

    match ch {
        '"' | '\'' => {
            let mut escaped = false;
            stream.eat_while(|c| {
                let more = escaped || c != ch;
                escaped = !escaped && c == '\\';
                more
            });
            stream.eat(ch);
            Some(Style::String)
        }
        '`' => {
            state.region = Region::Template;
            template(stream, state)
        }
        c if c.is_ascii_digit() || (c == '.' && stream.peek().is_some_and(|n| n.is_ascii_digit())) => {
            number(stream);
            Some(Style::Number)
        }
        '.' => {
            if !stream.match_str("..") {
                state.previous = Previous::Dot;
            }
            None
        }
        '?' if stream.eat('.') => {
            state.previous = Previous::Dot;
            None
        }
        '{' => {
            state.braces.push(Brace::Block);
            None
        }
        '}' => {
            if state.braces.pop() == Some(Brace::Hole) {
                state.region = Region::Template;
                Some(Style::String2)
            } else {
                None
            }
        }
        c if is_ident_start(c) => {
            stream.eat_while(is_ident_char);
            Some(word(stream.current(), previous, state))
        }
        c if OPERATOR_CHARS.contains(c) => {
            stream.eat_while(|c| OPERATOR_CHARS.contains(c));
            Some(Style::Operator)
        }
        _ => None,
    }
}

fn word(word: &str, previous: Previous, state: &mut ScriptState) -> Style {
    if previous == Previous::Dot {
        return Style::Property;
    }
    if KEYWORDS.contains(&word) {
        if matches!(word, "let" | "const" | "var") {
            state.previous = Previous::Declaration;
        }
        return Style::Keyword;
    }
    if ATOMS.contains(&word) {
        Style::Atom
    } else if previous == Previous::Declaration {
        Style::Def
    } else {
        Style::Variable
    }
}

fn number(stream: &mut LineStream<'_>) {
    let mut exponent = false;
    stream.eat_while(|c| {
        let sign = exponent && (c == '+' || c == '-');
        exponent = c == 'e' || c == 'E';
        sign || c.is_ascii_alphanumeric() || c == '.' || c == '_'
    });
}

fn block_comment(stream: &mut LineStream<'_>, state: &mut ScriptState) -> Option<Style> {
    while !stream.eol() {
        if stream.match_str("*/") {
            state.region = Region::Code;
            break;
        }
        stream.next_char();
    }
    Some(Style::Comment)
}

fn template(stream: &mut LineStream<'_>, state: &mut ScriptState) -> Option<Style> {
    while let Some(ch) = stream.peek() {
        if stream.looking_at("${") {
            if stream.current().is_empty() {
                stream.match_str("${");
                state.braces.push(Brace::Hole);
                state.region = Region::Code;
            }
            return Some(Style::String2);
        }
        stream.next_char();
        match ch {
            '`' => {
                state.region = Region::Code;
                break;
            }
            '\\' => {
                stream.next_char();
            }
            _ => {}
        }
    }
    Some(Style::String2)
}
