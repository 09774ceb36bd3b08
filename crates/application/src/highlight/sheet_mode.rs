//! The sheet editor mode.
//!
//! Tokenizes a sheet one line at a time. Page breaks and comments are styled
//! here; script blocks and request bodies are handed to embedded modes.

use std::sync::Arc;

use prestige_domain::sheet::{JAVASCRIPT_TAG, is_blank, is_page_break, page_break_tail};

use super::mode::{EmbeddedMode, ModeKind, ModeState, Style, Token};
use super::stream::LineStream;

/// Which part of a sheet the tokenizer is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetContext {
    /// Inside a `### javascript` block.
    Javascript,
    /// Method, URL, query and header lines.
    RequestPreamble,
    /// After the blank line that ends the preamble.
    RequestBody,
}

/// State of the embedded mode currently in charge.
#[derive(Debug)]
pub struct EmbeddedState {
    /// Mode that owns the state.
    pub mode: ModeKind,
    /// The mode's own state.
    pub state: Box<dyn ModeState>,
}

impl Clone for EmbeddedState {
    fn clone(&self) -> Self {
        Self {
            mode: self.mode,
            state: self.state.clone_state(),
        }
    }
}

impl PartialEq for EmbeddedState {
    fn eq(&self, other: &Self) -> bool {
        self.mode == other.mode && self.state.same_state(other.state.as_ref())
    }
}

/// Tokenizer state carried from one line to the next.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SheetState {
    /// Current section; `None` before the first request line of a section.
    pub context: Option<SheetContext>,
    /// Set by the blank line that starts a body, cleared by the next token.
    pub body_just_started: bool,
    /// Embedded mode state, when a script block or body is being delegated.
    pub embedded: Option<EmbeddedState>,
}

/// The sheet mode, with its embedded script and JSON modes.
#[derive(Clone)]
pub struct SheetMode {
    script: Arc<dyn EmbeddedMode>,
    json: Arc<dyn EmbeddedMode>,
}

impl SheetMode {
    /// Creates the mode from its embedded modes.
    #[must_use]
    pub fn new(script: Arc<dyn EmbeddedMode>, json: Arc<dyn EmbeddedMode>) -> Self {
        Self { script, json }
    }

    /// State at the top of a document.
    #[must_use]
    pub fn start_state(&self) -> SheetState {
        SheetState::default()
    }

    fn embedded(&self, kind: ModeKind) -> &dyn EmbeddedMode {
        match kind {
            ModeKind::Script => self.script.as_ref(),
            ModeKind::Json => self.json.as_ref(),
        }
    }

    fn enter(&self, kind: ModeKind) -> EmbeddedState {
        EmbeddedState {
            mode: kind,
            state: self.embedded(kind).start_state(),
        }
    }

    /// Consumes one token and returns its style.
    pub fn token(&self, stream: &mut LineStream<'_>, state: &mut SheetState) -> Option<Style> {
        let body_just_started = std::mem::take(&mut state.body_just_started);

        if stream.sol() && is_page_break(stream.rest()) {
            let line = stream.rest();
            state.embedded = None;
            state.context = if page_break_tail(line) == JAVASCRIPT_TAG {
                state.embedded = Some(self.enter(ModeKind::Script));
                Some(SheetContext::Javascript)
            } else {
                None
            };
            stream.skip_to_end();
            return Some(Style::PageBreak);
        }

        if stream.sol() && stream.eat('#') {
            stream.skip_to_end();
            return Some(Style::Comment);
        }

        match state.context {
            Some(SheetContext::Javascript) => self.delegate(stream, state),
            None | Some(SheetContext::RequestPreamble) => {
                state.context = Some(SheetContext::RequestPreamble);
                stream.skip_to_end();
                None
            }
            Some(SheetContext::RequestBody) => {
                if body_just_started {
                    if stream.peek() == Some('{') {
                        state.embedded = Some(self.enter(ModeKind::Json));
                    } else if stream.eat('=') {
                        state.embedded = Some(self.enter(ModeKind::Script));
                    }
                }
                if state.embedded.is_some() {
                    self.delegate(stream, state)
                } else {
                    stream.skip_to_end();
                    Some(Style::String)
                }
            }
        }
    }

    fn delegate(&self, stream: &mut LineStream<'_>, state: &mut SheetState) -> Option<Style> {
        match state.embedded.as_mut() {
            Some(embedded) => self.embedded(embedded.mode).token(stream, embedded.state.as_mut()),
            None => {
                stream.skip_to_end();
                Some(Style::Error)
            }
        }
    }

    /// Handles a line with no visible content.
    pub fn blank_line(&self, state: &mut SheetState) {
        if state.context == Some(SheetContext::RequestPreamble) {
            state.context = Some(SheetContext::RequestBody);
            state.body_just_started = true;
        } else if let Some(embedded) = state.embedded.as_mut() {
            self.embedded(embedded.mode).blank_line(embedded.state.as_mut());
        }
    }

    /// Tokenizes one line, advancing `state` to the start of the next line.
    ///
    /// Adjacent tokens with the same style are not merged.
    pub fn tokenize_line(&self, line: &str, state: &mut SheetState) -> Vec<Token> {
        if is_blank(line) {
            self.blank_line(state);
            return if line.is_empty() {
                Vec::new()
            } else {
                vec![Token::new(line, None)]
            };
        }

        let mut stream = LineStream::new(line);
        let mut tokens = Vec::new();
        while !stream.eol() {
            stream.start_token();
            let style = self.token(&mut stream, state);
            if stream.current().is_empty() {
                // A mode that does not advance would loop forever.
                stream.next_char();
                tokens.push(Token::new(stream.current(), Some(Style::Error)));
                continue;
            }
            tokens.push(Token::new(stream.current(), style));
        }
        tokens
    }

    /// Tokenizes a whole document from the top.
    pub fn tokenize<S: AsRef<str>>(&self, lines: &[S]) -> Vec<Vec<Token>> {
        let mut state = self.start_state();
        lines
            .iter()
            .map(|line| self.tokenize_line(line.as_ref(), &mut state))
            .collect()
    }
}

impl std::fmt::Debug for SheetMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SheetMode").finish_non_exhaustive()
    }
}
