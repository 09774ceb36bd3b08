//! Request extraction.
//!
//! Given the lines of a sheet and a target line, finds the request block to
//! run, executes every script block above it in document order, interpolates
//! the request preamble and assembles a [`RequestDetails`].

mod payload;
mod preamble;
mod query;

pub use query::{QueryParams, encode_uri_component};

use prestige_domain::sheet::is_comment;
use prestige_domain::{Block, ExecutionContext, LineRange, RequestDetails};
use tracing::debug;

use crate::error::{ExtractError, ExtractResult};
use crate::interpolate::interpolate;
use crate::parser::parse;
use crate::ports::ScriptHost;

/// The request block chosen for a target line, with the scripts that precede it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionPlan {
    /// Script blocks to run first, in document order.
    pub scripts: Vec<LineRange>,
    /// Method, URL, query and header lines.
    pub header: LineRange,
    /// Body lines, if any.
    pub payload: Option<LineRange>,
}

/// Chooses the request to run for `target_line`.
///
/// Blocks starting after the target line are never considered. The chosen
/// request is the first one that ends at or after the target line.
///
/// # Errors
///
/// Returns [`ExtractError::InsideScriptBlock`] when the target line lies in a
/// script block and [`ExtractError::NoRequest`] when no request qualifies.
pub fn plan_execution(blocks: &[Block], target_line: usize) -> ExtractResult<ExecutionPlan> {
    let mut scripts = Vec::new();

    for block in blocks {
        if block.start() > target_line {
            break;
        }

        match block {
            Block::Javascript { start, end } => {
                if *end >= target_line {
                    return Err(ExtractError::InsideScriptBlock);
                }
                scripts.push(LineRange::new(*start, *end));
            }
            Block::HttpRequest {
                end, header, payload, ..
            } if *end >= target_line => {
                return Ok(ExecutionPlan {
                    scripts,
                    header: *header,
                    payload: *payload,
                });
            }
            Block::HttpRequest { .. } | Block::PageBreak { .. } => {}
        }
    }

    Err(ExtractError::NoRequest)
}

/// Extracts the request at `target_line`.
///
/// Script blocks above the request run first, strictly one after the other,
/// and may leave values in `context` for the preamble and payload to use.
/// Their side effects stay in place even if a later step fails.
///
/// # Errors
///
/// Returns the structural errors of [`plan_execution`], a blank header name
/// error, or whatever a script, the payload expression or interpolation
/// raised, unchanged.
pub async fn extract_request<S: AsRef<str> + Sync>(
    lines: &[S],
    target_line: usize,
    context: &mut ExecutionContext,
    host: &dyn ScriptHost,
) -> ExtractResult<RequestDetails> {
    let lines: Vec<&str> = lines.iter().map(AsRef::as_ref).collect();
    let blocks = parse(&lines);
    debug!(?blocks, target_line, "parsed sheet");

    let plan = plan_execution(&blocks, target_line)?;
    debug!(?plan, "selected request");

    for script in &plan.scripts {
        let source = script_source(&lines, *script);
        host.evaluate(&source, context).await?;
    }

    let preamble = preamble_text(&lines, plan.header);
    let rendered = interpolate(&preamble, context, host).await?;
    let mut details = preamble::parse_preamble(&rendered)?;

    if let Some(range) = plan.payload {
        payload::render_payload(slice(&lines, range), &mut details, context, host).await?;
    }

    Ok(details)
}

fn slice<'a>(lines: &'a [&'a str], range: LineRange) -> &'a [&'a str] {
    let end = (range.end + 1).min(lines.len());
    &lines[range.start.min(end)..end]
}

/// Source of a script block; comment lines are blanked so line numbers stay aligned.
#[must_use]
pub fn script_source(lines: &[&str], range: LineRange) -> String {
    slice(lines, range)
        .iter()
        .map(|line| if is_comment(line) { "" } else { *line })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Preamble text of a request, without comment lines.
fn preamble_text(lines: &[&str], range: LineRange) -> String {
    slice(lines, range)
        .iter()
        .filter(|line| !is_comment(line))
        .copied()
        .collect::<Vec<_>>()
        .join("\n")
}
