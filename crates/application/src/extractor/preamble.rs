//! Parsing of an interpolated request preamble.

use prestige_domain::RequestDetails;

use super::query::QueryParams;
use crate::error::{ExtractError, ExtractResult};

/// Builds method, URL and headers from interpolated preamble text.
///
/// The first line holds the method and URL. Indented lines before the first
/// unindented one are query parameters; every line from the first unindented
/// one on is a `Name: value` header, so an empty line left behind by
/// interpolation is a header without a name. Whitespace-only lines among the
/// query parameters are skipped.
pub(super) fn parse_preamble(text: &str) -> ExtractResult<RequestDetails> {
    let mut details = RequestDetails::default();
    let mut lines = text.split('\n');

    let mut words = lines.next().unwrap_or_default().split_whitespace();
    if let Some(method) = words.next() {
        details.method = method.to_uppercase();
    }
    details.url = words.collect::<Vec<_>>().join(" ");

    let mut query = QueryParams::new();
    let mut headers_started = false;

    for line in lines {
        if !line.starts_with(char::is_whitespace) {
            headers_started = true;
        }

        if headers_started {
            let (name, value) = line.split_once(':').unwrap_or((line, ""));
            let name = name.trim();
            if name.is_empty() {
                return Err(ExtractError::BlankHeaderName);
            }
            details.headers.append(name, value.trim());
        } else if !line.trim().is_empty() {
            query.push_line(line.trim_start());
        }
    }

    query.append_to(&mut details.url);
    Ok(details)
}
