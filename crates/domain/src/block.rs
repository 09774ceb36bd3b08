//! Structural blocks of a sheet.

use serde::{Deserialize, Serialize};

/// An inclusive range of line indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineRange {
    /// First line of the range.
    pub start: usize,
    /// Last line of the range (inclusive).
    pub end: usize,
}

impl LineRange {
    /// Creates a new line range.
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// A range covering a single line.
    #[must_use]
    pub const fn single(line: usize) -> Self {
        Self::new(line, line)
    }

    /// Returns true if `line` lies inside the range.
    #[must_use]
    pub const fn contains(&self, line: usize) -> bool {
        self.start <= line && line <= self.end
    }

    /// Number of lines covered.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end + 1 - self.start
    }

    /// Always false; a range covers at least one line.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }
}

/// Discriminant of a [`Block`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    /// A `###` separator line.
    PageBreak,
    /// A request section.
    HttpRequest,
    /// A script section.
    Javascript,
}

/// A structural region of a sheet, as produced by the block parser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Block {
    /// A single `###` line, with the text that follows the marker.
    PageBreak {
        /// Line of the marker.
        start: usize,
        /// Same as `start`.
        end: usize,
        /// Trimmed text after the leading `#`s.
        tail: String,
    },
    /// A request: preamble (method, URL, query lines, headers) and an optional payload.
    HttpRequest {
        /// First line of the section.
        start: usize,
        /// Last line of the section.
        end: usize,
        /// Method line plus the header lines that follow it.
        header: LineRange,
        /// Body lines, present only when a blank line separates them from the header.
        payload: Option<LineRange>,
    },
    /// Content lines of a `### javascript` section.
    Javascript {
        /// First content line.
        start: usize,
        /// Last line of the section.
        end: usize,
    },
}

impl Block {
    /// First line of the block.
    #[must_use]
    pub const fn start(&self) -> usize {
        match self {
            Self::PageBreak { start, .. }
            | Self::HttpRequest { start, .. }
            | Self::Javascript { start, .. } => *start,
        }
    }

    /// Last line of the block (inclusive).
    #[must_use]
    pub const fn end(&self) -> usize {
        match self {
            Self::PageBreak { end, .. } | Self::HttpRequest { end, .. } | Self::Javascript { end, .. } => {
                *end
            }
        }
    }

    /// The full line span of the block.
    #[must_use]
    pub const fn range(&self) -> LineRange {
        LineRange::new(self.start(), self.end())
    }

    /// Returns true if `line` lies inside the block.
    #[must_use]
    pub const fn contains(&self, line: usize) -> bool {
        self.range().contains(line)
    }

    /// The kind of block.
    #[must_use]
    pub const fn kind(&self) -> BlockKind {
        match self {
            Self::PageBreak { .. } => BlockKind::PageBreak,
            Self::HttpRequest { .. } => BlockKind::HttpRequest,
            Self::Javascript { .. } => BlockKind::Javascript,
        }
    }
}
