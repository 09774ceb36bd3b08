//! Syntax checking port used by the linter

/// A syntax problem found in a piece of script source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxIssue {
    /// Description of the problem.
    pub message: String,
    /// Zero-based line within the checked source.
    pub line: usize,
    /// Zero-based column within that line.
    pub column: usize,
}

/// Port for checking script source without running it.
pub trait SyntaxChecker: Send + Sync {
    /// Checks `source` as the body of an async function.
    ///
    /// # Errors
    ///
    /// Returns the first syntax problem found.
    fn check(&self, source: &str) -> Result<(), SyntaxIssue>;
}
