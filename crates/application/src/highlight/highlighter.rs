//! Incremental highlighting of a whole document.

use super::mode::Token;
use super::sheet_mode::{SheetMode, SheetState};

#[derive(Debug, Clone)]
struct LineEntry {
    text: String,
    start_state: SheetState,
    tokens: Vec<Token>,
}

/// Keeps the tokens and start state of every line of a document.
///
/// On [`update`](Self::update) only lines from the first edited one are
/// tokenized again, and work stops as soon as an unchanged line is reached
/// with the same state it had before.
#[derive(Debug)]
pub struct SheetHighlighter {
    mode: SheetMode,
    lines: Vec<LineEntry>,
    end_state: SheetState,
}

impl SheetHighlighter {
    /// Creates a highlighter for an empty document.
    #[must_use]
    pub fn new(mode: SheetMode) -> Self {
        let end_state = mode.start_state();
        Self {
            mode,
            lines: Vec::new(),
            end_state,
        }
    }

    /// Brings the highlighting up to date with `lines`.
    ///
    /// `first_changed` is the first line the editor reports as edited; lines
    /// before it are also compared, so passing `0` is always correct.
    /// Returns the number of lines that had to be tokenized.
    pub fn update<S: AsRef<str>>(&mut self, lines: &[S], first_changed: usize) -> usize {
        let new: Vec<&str> = lines.iter().map(AsRef::as_ref).collect();
        let old_len = self.lines.len();

        let prefix = self
            .lines
            .iter()
            .zip(&new)
            .take(first_changed)
            .take_while(|(entry, text)| entry.text == **text)
            .count();
        if prefix == old_len && prefix == new.len() {
            return 0;
        }

        let max_suffix = old_len.min(new.len()) - prefix;
        let suffix = self
            .lines
            .iter()
            .rev()
            .zip(new.iter().rev())
            .take(max_suffix)
            .take_while(|(entry, text)| entry.text == **text)
            .count();

        let mut state = self
            .lines
            .get(prefix)
            .map_or_else(|| self.end_state.clone(), |entry| entry.start_state.clone());

        let mut old_tail = self.lines.split_off(prefix);
        let reusable = old_tail.split_off(old_tail.len() - suffix);
        let first_reusable = new.len() - suffix;
        let mut tokenized = 0;

        for (index, text) in new.iter().enumerate().skip(prefix) {
            if index >= first_reusable {
                let offset = index - first_reusable;
                if reusable[offset].start_state == state {
                    self.lines.extend(reusable.into_iter().skip(offset));
                    return tokenized;
                }
            }

            let start_state = state.clone();
            let tokens = self.mode.tokenize_line(text, &mut state);
            self.lines.push(LineEntry {
                text: (*text).to_string(),
                start_state,
                tokens,
            });
            tokenized += 1;
        }

        self.end_state = state;
        tokenized
    }

    /// Tokens of a line.
    #[must_use]
    pub fn tokens(&self, line: usize) -> Option<&[Token]> {
        self.lines.get(line).map(|entry| entry.tokens.as_slice())
    }

    /// State at the start of a line; the checkpoint an editor resumes from.
    #[must_use]
    pub fn state_at(&self, line: usize) -> Option<&SheetState> {
        self.lines.get(line).map(|entry| &entry.start_state)
    }

    /// Number of lines known.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns true if no lines are known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::highlight::mode::Style;
    use crate::highlight::sheet_mode::tests::word_sheet_mode;
    use pretty_assertions::assert_eq;

    fn all_tokens(highlighter: &SheetHighlighter) -> Vec<Vec<Token>> {
        (0..highlighter.len()).map(|i| highlighter.tokens(i).unwrap().to_vec()).collect()
    }

    #[test]
    fn first_update_tokenizes_everything() {
        let mut highlighter = SheetHighlighter::new(word_sheet_mode());
        let lines = ["GET x", "", "body", "###", "GET y"];
        assert_eq!(highlighter.update(&lines, 0), 5);
        assert_eq!(highlighter.update(&lines, 0), 0);
        assert_eq!(highlighter.update(&lines, 5), 0);
        assert_eq!(all_tokens(&highlighter), word_sheet_mode().tokenize(&lines));
    }

    #[test]
    fn local_edit_stops_at_unchanged_state() {
        let mut highlighter = SheetHighlighter::new(word_sheet_mode());
        highlighter.update(&["GET x", "Accept: a", "", "body", "###", "GET y", "A: b"], 0);

        let edited = ["GET x", "Accept: b", "", "body", "###", "GET y", "A: b"];
        assert_eq!(highlighter.update(&edited, 1), 1);
        assert_eq!(all_tokens(&highlighter), word_sheet_mode().tokenize(&edited));
    }

    #[test]
    fn edit_that_changes_state_propagates() {
        let mut highlighter = SheetHighlighter::new(word_sheet_mode());
        highlighter.update(&["###", "let a", "let b", "###", "GET x"], 0);

        let edited = ["### javascript", "let a", "let b", "###", "GET x"];
        let retokenized = highlighter.update(&edited, 0);
        assert!(retokenized >= 3, "retokenized {retokenized}");
        assert_eq!(highlighter.tokens(1).unwrap()[0].style, Some(Style::Variable));
        assert_eq!(all_tokens(&highlighter), word_sheet_mode().tokenize(&edited));
    }

    #[test]
    fn inserted_and_removed_lines() {
        let mut highlighter = SheetHighlighter::new(word_sheet_mode());
        highlighter.update(&["GET x", "", "a", "###", "GET y"], 0);

        let inserted = ["GET x", "", "a", "b", "###", "GET y"];
        highlighter.update(&inserted, 3);
        assert_eq!(all_tokens(&highlighter), word_sheet_mode().tokenize(&inserted));

        let removed = ["GET x", "###", "GET y"];
        highlighter.update(&removed, 1);
        assert_eq!(highlighter.len(), 3);
        assert_eq!(all_tokens(&highlighter), word_sheet_mode().tokenize(&removed));

        let appended = ["GET x", "###", "GET y", "", "tail"];
        assert_eq!(highlighter.update(&appended, 3), 2);
        assert_eq!(all_tokens(&highlighter), word_sheet_mode().tokenize(&appended));
    }

    #[test]
    fn state_at_returns_checkpoints() {
        let mut highlighter = SheetHighlighter::new(word_sheet_mode());
        highlighter.update(&["### javascript", "a", "b"], 0);
        let checkpoint = highlighter.state_at(2).unwrap().clone();

        let mode = word_sheet_mode();
        let mut resumed = checkpoint;
        let tokens = mode.tokenize_line("b", &mut resumed);
        assert_eq!(tokens, highlighter.tokens(2).unwrap());
    }
}
