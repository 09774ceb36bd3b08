//! Query string building for indented parameter lines.

/// Characters `encodeURIComponent` leaves alone on top of the URL-safe set.
const KEEP: [(&str, &str); 5] = [("%21", "!"), ("%2A", "*"), ("%27", "'"), ("%28", "("), ("%29", ")")];

/// Percent-encodes a query component the way `encodeURIComponent` does.
///
/// ```
/// use prestige_application::extractor::encode_uri_component;
///
/// assert_eq!(encode_uri_component("a bang!"), "a%20bang!");
/// assert_eq!(encode_uri_component("x=1&y"), "x%3D1%26y");
/// ```
#[must_use]
pub fn encode_uri_component(input: &str) -> String {
    let mut encoded = urlencoding::encode(input).into_owned();
    // Every `%` in the output starts an escape triple, so these replacements
    // cannot match across an escape of a literal `%`.
    for (escape, ch) in KEEP {
        if encoded.contains(escape) {
            encoded = encoded.replace(escape, ch);
        }
    }
    encoded
}

/// Ordered query parameters; a repeated key replaces the earlier value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    /// Creates an empty parameter list.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Adds a `key=value` line; a line without `=` is a key with an empty value.
    pub fn push_line(&mut self, line: &str) {
        let (key, value) = line.split_once('=').unwrap_or((line, ""));
        match self.0.iter_mut().find(|(existing, _)| existing == key) {
            Some((_, existing)) => value.clone_into(existing),
            None => self.0.push((key.to_string(), value.to_string())),
        }
    }

    /// Returns true if no parameters were added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Encodes the parameters as `k=v&k2=v2`; keys with an empty value are written bare.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        self.0
            .iter()
            .map(|(key, value)| {
                if value.is_empty() {
                    encode_uri_component(key)
                } else {
                    format!("{}={}", encode_uri_component(key), encode_uri_component(value))
                }
            })
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Appends the parameters to `url`, using `&` if it already has a query.
    pub fn append_to(&self, url: &mut String) {
        if self.is_empty() {
            return;
        }
        url.push(if url.contains('?') { '&' } else { '?' });
        url.push_str(&self.to_query_string());
    }
}
