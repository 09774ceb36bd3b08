//! Character stream over a single line.

/// Cursor over one line of text, with a token start marker.
///
/// Modes advance the cursor past one token per call; the text between the
/// marker and the cursor is the token.
#[derive(Debug, Clone)]
pub struct LineStream<'a> {
    line: &'a str,
    pos: usize,
    start: usize,
}

impl<'a> LineStream<'a> {
    /// Creates a stream at the start of `line`.
    #[must_use]
    pub const fn new(line: &'a str) -> Self {
        Self { line, pos: 0, start: 0 }
    }

    /// Byte position of the cursor.
    #[must_use]
    pub const fn pos(&self) -> usize {
        self.pos
    }

    /// True at the start of the line.
    #[must_use]
    pub const fn sol(&self) -> bool {
        self.pos == 0
    }

    /// True at the end of the line.
    #[must_use]
    pub const fn eol(&self) -> bool {
        self.pos >= self.line.len()
    }

    /// Marks the current position as the start of the next token.
    pub const fn start_token(&mut self) {
        self.start = self.pos;
    }

    /// The text of the current token.
    #[must_use]
    pub fn current(&self) -> &'a str {
        &self.line[self.start..self.pos]
    }

    /// The text after the cursor.
    #[must_use]
    pub fn rest(&self) -> &'a str {
        &self.line[self.pos..]
    }

    /// The next character, without consuming it.
    #[must_use]
    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Consumes and returns the next character.
    pub fn next_char(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    /// Consumes the next character if it equals `expected`.
    pub fn eat(&mut self, expected: char) -> bool {
        self.eat_if(|c| c == expected).is_some()
    }

    /// Consumes the next character if it satisfies `pred`.
    pub fn eat_if(&mut self, pred: impl FnOnce(char) -> bool) -> Option<char> {
        let ch = self.peek().filter(|c| pred(*c))?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    /// Consumes characters while `pred` holds; returns true if any were consumed.
    pub fn eat_while(&mut self, mut pred: impl FnMut(char) -> bool) -> bool {
        let before = self.pos;
        while self.eat_if(&mut pred).is_some() {}
        self.pos > before
    }

    /// Consumes whitespace; returns true if any was consumed.
    pub fn eat_space(&mut self) -> bool {
        self.eat_while(char::is_whitespace)
    }

    /// Moves the cursor to the end of the line.
    pub const fn skip_to_end(&mut self) {
        self.pos = self.line.len();
    }

    /// Advances to the next occurrence of `ch` (not consuming it); false if there is none.
    pub fn skip_to(&mut self, ch: char) -> bool {
        match self.rest().find(ch) {
            Some(offset) => {
                self.pos += offset;
                true
            }
            None => false,
        }
    }

    /// Returns true if the text after the cursor starts with `pattern`.
    #[must_use]
    pub fn looking_at(&self, pattern: &str) -> bool {
        self.rest().starts_with(pattern)
    }

    /// Consumes `pattern` if the text after the cursor starts with it.
    pub fn match_str(&mut self, pattern: &str) -> bool {
        if self.looking_at(pattern) {
            self.pos += pattern.len();
            true
        } else {
            false
        }
    }

    /// Moves the cursor back by `count` characters, never before the token start.
    pub fn backup(&mut self, count: usize) {
        for _ in 0..count {
            match self.line[self.start..self.pos].chars().next_back() {
                Some(ch) => self.pos -= ch.len_utf8(),
                None => break,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn consumes_tokens() {
        let mut stream = LineStream::new("### javascript");
        assert!(stream.sol());
        assert!(stream.match_str("###"));
        assert!(!stream.sol());
        assert_eq!(stream.current(), "###");

        stream.start_token();
        assert!(stream.eat_space());
        assert!(stream.looking_at("javascript"));
        assert!(!stream.match_str("java "));
        stream.skip_to_end();
        assert!(stream.eol());
        assert_eq!(stream.current(), " javascript");
    }

    #[test]
    fn eat_and_backup_respect_char_boundaries() {
        let mut stream = LineStream::new("héllo");
        assert!(stream.eat('h'));
        assert_eq!(stream.next_char(), Some('é'));
        assert_eq!(stream.pos(), 3);
        stream.backup(1);
        assert_eq!(stream.peek(), Some('é'));
        stream.backup(5);
        assert_eq!(stream.pos(), 0);
    }

    #[test]
    fn skip_to_stops_before_the_char() {
        let mut stream = LineStream::new("abc}def");
        assert!(stream.skip_to('}'));
        assert_eq!(stream.rest(), "}def");
        assert!(!stream.skip_to('x'));
        assert_eq!(stream.rest(), "}def");
    }
}
