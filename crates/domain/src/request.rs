//! The request assembled from a sheet.

use serde::{Deserialize, Serialize};

/// Body type used for plain text payloads.
pub const BODY_TYPE_RAW: &str = "raw";

/// Body type used when a payload evaluates to a multipart form.
pub const BODY_TYPE_MULTIPART: &str = "multipart/form-data";

/// Ordered header list. Names keep the case they were written with and may repeat.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Headers(Vec<(String, String)>);

impl Headers {
    /// Creates an empty header list.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Adds a header, keeping any existing header with the same name.
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.push((name.into(), value.into()));
    }

    /// Sets a header, dropping every existing header with the same name (ignoring case).
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        self.0.retain(|(existing, _)| !existing.eq_ignore_ascii_case(&name));
        self.0.push((name, value.into()));
    }

    /// Returns the first value for `name` (ignoring case).
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Iterates over `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Number of header entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no headers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for Headers {
    fn from_iter<T: IntoIterator<Item = (N, V)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(n, v)| (n.into(), v.into())).collect())
    }
}

/// A fully assembled request, ready to hand to an HTTP executor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestDetails {
    /// Upper-cased HTTP method.
    pub method: String,
    /// Target URL including any query string built from parameter lines.
    pub url: String,
    /// Headers in the order they were written.
    pub headers: Headers,
    /// `raw` or `multipart/form-data`.
    pub body_type: String,
    /// Request body, trimmed.
    pub body: String,
}

impl Default for RequestDetails {
    fn default() -> Self {
        Self {
            method: "GET".to_string(),
            url: String::new(),
            headers: Headers::new(),
            body_type: BODY_TYPE_RAW.to_string(),
            body: String::new(),
        }
    }
}
