//! Application error types

use thiserror::Error;

use crate::interpolate::InterpolateError;
use crate::ports::ScriptError;

/// Errors raised while extracting a request from a sheet.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// No request block covers or follows the target line.
    #[error("Couldn't identify the request to be run.")]
    NoRequest,

    /// The target line lies inside a script block.
    #[error("Can't execute from inside a script block.")]
    InsideScriptBlock,

    /// A header line has nothing before its `:`.
    #[error("Header name cannot be blank.")]
    BlankHeaderName,

    /// A script block or payload expression failed.
    #[error(transparent)]
    Script(#[from] ScriptError),

    /// The request preamble could not be interpolated.
    #[error(transparent)]
    Interpolate(#[from] InterpolateError),
}

/// Result type alias for request extraction.
pub type ExtractResult<T> = Result<T, ExtractError>;
