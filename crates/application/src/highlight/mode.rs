//! Editor mode abstractions.

use std::any::Any;
use std::fmt;

use super::stream::LineStream;

/// Token style, named after the editor CSS classes it maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Style {
    /// A `###` page break line.
    PageBreak,
    /// A comment.
    Comment,
    /// A string, or plain body text.
    String,
    /// A template literal.
    String2,
    /// A number.
    Number,
    /// A language keyword.
    Keyword,
    /// `true`, `false`, `null` and friends.
    Atom,
    /// A variable reference.
    Variable,
    /// A property name.
    Property,
    /// A declared name.
    Def,
    /// An operator.
    Operator,
    /// Text the mode does not understand.
    Error,
}

impl Style {
    /// The editor class name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PageBreak => "tag header",
            Self::Comment => "comment",
            Self::String => "string",
            Self::String2 => "string-2",
            Self::Number => "number",
            Self::Keyword => "keyword",
            Self::Atom => "atom",
            Self::Variable => "variable",
            Self::Property => "property",
            Self::Def => "def",
            Self::Operator => "operator",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A styled slice of a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The token text.
    pub text: String,
    /// Its style, `None` for unstyled text.
    pub style: Option<Style>,
}

impl Token {
    /// Creates a token.
    #[must_use]
    pub fn new(text: impl Into<String>, style: Option<Style>) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

/// Identifies an embedded mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModeKind {
    /// Script code, in `### javascript` blocks and `=` payloads.
    Script,
    /// JSON payloads.
    Json,
}

/// Per-line state of an embedded mode.
///
/// Implemented for every `Clone + PartialEq` type, so a mode only has to
/// derive those on its state struct.
pub trait ModeState: Any + fmt::Debug + Send + Sync {
    /// Copies the state, so highlighting can resume from it later.
    fn clone_state(&self) -> Box<dyn ModeState>;

    /// Compares with another state of the same mode.
    fn same_state(&self, other: &dyn ModeState) -> bool;

    /// Upcast for downcasting to the concrete state.
    fn as_any(&self) -> &dyn Any;

    /// Mutable upcast for downcasting to the concrete state.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T> ModeState for T
where
    T: Any + Clone + PartialEq + fmt::Debug + Send + Sync,
{
    fn clone_state(&self) -> Box<dyn ModeState> {
        Box::new(self.clone())
    }

    fn same_state(&self, other: &dyn ModeState) -> bool {
        other.as_any().downcast_ref::<T>().is_some_and(|other| other == self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// A tokenizer that can be embedded in the sheet mode.
pub trait EmbeddedMode: Send + Sync {
    /// Which mode this is.
    fn kind(&self) -> ModeKind;

    /// State at the start of an embedded region.
    fn start_state(&self) -> Box<dyn ModeState>;

    /// Consumes one token from `stream` and returns its style.
    ///
    /// Must advance the stream unless it is at the end of the line.
    fn token(&self, stream: &mut LineStream<'_>, state: &mut dyn ModeState) -> Option<Style>;

    /// Called for blank lines inside the embedded region.
    fn blank_line(&self, _state: &mut dyn ModeState) {}
}
