//! Sheet text conventions.
//!
//! A sheet is plain text split into lines. Three kinds of marker lines give it
//! structure:
//! - `###` (optionally followed by a tag such as `javascript`) separates sections,
//! - a line starting with a single `#` (or `##`) is a comment,
//! - a blank line separates a request preamble from its payload.
//!
//! Both the block parser and the editor tokenizer go through these helpers so
//! they always agree on where the markers are.

/// Tag that turns the section after a page break into a script block.
pub const JAVASCRIPT_TAG: &str = "javascript";

/// Content of a freshly created sheet.
///
/// Used as the starting document for new sheets and as a shared test fixture.
pub const DEFAULT_SHEET: &str = "GET http://httpbin.org/get?name=haha

###

POST http://httpbin.org/post
Content-Type: application/x-www-form-urlencoded

username=sherlock&password=elementary
";

/// Returns true if the line is a page break marker (`###...`).
#[must_use]
pub fn is_page_break(line: &str) -> bool {
    line.starts_with("###")
}

/// Returns true if the line is a comment, i.e. starts with `#` but is not a page break.
#[must_use]
pub fn is_comment(line: &str) -> bool {
    line.starts_with('#') && !is_page_break(line)
}

/// Returns true if the line has no visible content.
#[must_use]
pub fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Returns the tag of a page break line: the text after the leading `#`s and whitespace.
///
/// ```
/// use prestige_domain::sheet::page_break_tail;
///
/// assert_eq!(page_break_tail("### javascript"), "javascript");
/// assert_eq!(page_break_tail("####"), "");
/// ```
#[must_use]
pub fn page_break_tail(line: &str) -> &str {
    line.trim_start_matches('#').trim()
}

/// Splits sheet text into lines, accepting both `\n` and `\r\n` endings.
///
/// A trailing newline yields a final empty line, matching how an editor
/// counts lines.
#[must_use]
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn marker_classification() {
        assert!(is_page_break("###"));
        assert!(is_page_break("### javascript"));
        assert!(is_page_break("#####"));
        assert!(!is_page_break("## not a break"));

        assert!(is_comment("# hello"));
        assert!(is_comment("##"));
        assert!(!is_comment("###"));
        assert!(!is_comment(" # indented"));

        assert!(is_blank(""));
        assert!(is_blank("  \t"));
        assert!(!is_blank(" x "));
    }

    #[test]
    fn tail_strips_hashes_and_spaces() {
        assert_eq!(page_break_tail("###   javascript  "), "javascript");
        assert_eq!(page_break_tail("###javascript"), "javascript");
        assert_eq!(page_break_tail("### some title"), "some title");
        assert_eq!(page_break_tail("###"), "");
    }

    #[test]
    fn split_lines_handles_crlf() {
        assert_eq!(split_lines("a\r\nb\nc"), vec!["a", "b", "c"]);
        assert_eq!(split_lines("a\n"), vec!["a", ""]);
        assert_eq!(split_lines(""), vec![""]);
    }

    #[test]
    fn default_sheet_has_two_requests() {
        let lines = split_lines(DEFAULT_SHEET);
        assert_eq!(lines[0], "GET http://httpbin.org/get?name=haha");
        assert_eq!(lines.iter().filter(|l| is_page_break(l)).count(), 1);
    }
}
