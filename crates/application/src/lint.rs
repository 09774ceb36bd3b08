//! Inline lint diagnostics for the script parts of a sheet.

use prestige_domain::{Block, LineRange};
use serde::Serialize;

use crate::extractor::script_source;
use crate::parser::parse;
use crate::ports::SyntaxChecker;

/// How bad a diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// The code cannot run.
    Error,
}

/// A problem reported against a position in the sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Zero-based document line.
    pub line: usize,
    /// Zero-based column within the line.
    pub column: usize,
    /// Severity.
    pub severity: Severity,
    /// What is wrong.
    pub message: String,
}

/// Checks every script block and every `=` payload of a sheet.
///
/// Each block reports at most one diagnostic, the first problem the checker
/// finds. Diagnostics are returned in document order.
pub fn lint<S: AsRef<str>>(lines: &[S], checker: &dyn SyntaxChecker) -> Vec<Diagnostic> {
    let lines: Vec<&str> = lines.iter().map(AsRef::as_ref).collect();
    let mut diagnostics = Vec::new();

    for block in parse(&lines) {
        match block {
            Block::Javascript { start, end } => {
                let source = script_source(&lines, LineRange::new(start, end));
                if let Err(issue) = checker.check(&source) {
                    diagnostics.push(Diagnostic {
                        line: start + issue.line,
                        column: issue.column,
                        severity: Severity::Error,
                        message: issue.message,
                    });
                }
            }
            Block::HttpRequest {
                payload: Some(payload),
                ..
            } => {
                let text = lines.get(payload.start..=payload.end).unwrap_or_default().join("\n");
                let Some(expression) = text.strip_prefix('=') else {
                    continue;
                };
                if let Err(issue) = checker.check(&format!("{RETURN}{expression}")) {
                    // The first line lost `=` and gained `return `.
                    let column = if issue.line == 0 {
                        issue.column.saturating_sub(RETURN.len() - 1)
                    } else {
                        issue.column
                    };
                    diagnostics.push(Diagnostic {
                        line: payload.start + issue.line,
                        column,
                        severity: Severity::Error,
                        message: issue.message,
                    });
                }
            }
            Block::HttpRequest { .. } | Block::PageBreak { .. } => {}
        }
    }

    diagnostics
}

const RETURN: &str = "return ";

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::test_support::MarkerChecker;
    use pretty_assertions::assert_eq;
    use prestige_domain::DEFAULT_SHEET;
    use prestige_domain::sheet::split_lines;

    #[test]
    fn clean_sheet_has_no_diagnostics() {
        assert!(lint(&split_lines(DEFAULT_SHEET), &MarkerChecker).is_empty());
    }

    #[test]
    fn script_block_issue_maps_to_document_line() {
        let lines = ["GET http://x.test", "### javascript", "let a = 1", "# c", "a !!! 2", "###"];
        let diagnostics = lint(&lines, &MarkerChecker);
        assert_eq!(
            diagnostics,
            vec![Diagnostic {
                line: 4,
                column: 2,
                severity: Severity::Error,
                message: "Unexpected token '!!!'".into(),
            }]
        );
    }

    #[test]
    fn payload_expression_columns_are_shifted_back() {
        let lines = ["POST http://x.test", "", "={ a: !!! }", "###", "POST http://y.test", "", "={", "  b: !!!", "}"];
        let diagnostics = lint(&lines, &MarkerChecker);
        assert_eq!(diagnostics.len(), 2);
        assert_eq!((diagnostics[0].line, diagnostics[0].column), (2, 6));
        assert_eq!((diagnostics[1].line, diagnostics[1].column), (7, 5));
    }

    #[test]
    fn raw_payloads_are_not_checked() {
        let lines = ["POST http://x.test", "", "a=!!!"];
        assert!(lint(&lines, &MarkerChecker).is_empty());
    }
}
