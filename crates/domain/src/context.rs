//! State shared between script blocks, payload expressions and interpolation.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::value::{Object, Value};

/// A file made available to scripts by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedFile {
    /// Name scripts use to refer to the file.
    pub name: String,
    /// MIME type reported for the file.
    pub mime_type: String,
    /// Raw content.
    pub bytes: Vec<u8>,
}

/// Files staged for upload, keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileBucket {
    files: IndexMap<String, StagedFile>,
}

impl FileBucket {
    /// Creates an empty bucket.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a file under its own name.
    pub fn insert(&mut self, file: StagedFile) {
        self.files.insert(file.name.clone(), file);
    }

    /// Removes a file.
    pub fn remove(&mut self, name: &str) -> Option<StagedFile> {
        self.files.shift_remove(name)
    }

    /// Looks up a file.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&StagedFile> {
        self.files.get(name)
    }

    /// Number of staged files.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Returns true if nothing is staged.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Iterates over staged files in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &StagedFile> {
        self.files.values()
    }
}

/// Severity of a message raised by a script through `toast`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    /// Informational message.
    Success,
    /// Something went wrong.
    Danger,
}

impl NoticeKind {
    /// Maps a user-supplied type name; `error` is an alias of `danger`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "success" => Some(Self::Success),
            "danger" | "error" => Some(Self::Danger),
            _ => None,
        }
    }
}

/// A message raised by a script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    /// Severity.
    #[serde(rename = "type")]
    pub kind: NoticeKind,
    /// Message text.
    pub message: String,
}

/// Receiver (`this`) of every script block and payload expression.
///
/// Scripts communicate with later parts of the sheet through [`data`](Self::data);
/// the interpolator binds each of its keys as a variable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExecutionContext {
    /// The data bag.
    pub data: Object,
    /// Files reachable through `this.file(name)`.
    pub files: FileBucket,
    /// Messages raised through `this.toast(...)`, oldest first.
    pub notices: Vec<Notice>,
}

impl ExecutionContext {
    /// Creates an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a context whose data bag starts with the given entries.
    #[must_use]
    pub fn with_data(data: impl IntoIterator<Item = (String, Value)>) -> Self {
        Self {
            data: data.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Records a notice.
    pub fn notify(&mut self, kind: NoticeKind, message: impl Into<String>) {
        self.notices.push(Notice {
            kind,
            message: message.into(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn with_data_keeps_order() {
        let ctx = ExecutionContext::with_data([
            ("b".to_string(), Value::from("x")),
            ("a".to_string(), Value::Number(1.0)),
        ]);
        assert_eq!(ctx.data.keys().collect::<Vec<_>>(), vec!["b", "a"]);
    }

    #[test]
    fn file_bucket_replaces_by_name() {
        let mut bucket = FileBucket::new();
        bucket.insert(StagedFile { name: "a".into(), mime_type: "text/plain".into(), bytes: b"1".to_vec() });
        bucket.insert(StagedFile { name: "a".into(), mime_type: "text/plain".into(), bytes: b"22".to_vec() });
        assert_eq!(bucket.len(), 1);
        assert_eq!(bucket.get("a").map(|f| f.bytes.len()), Some(2));
        assert!(bucket.remove("a").is_some());
        assert!(bucket.is_empty());
    }

    #[test]
    fn notice_kind_aliases() {
        assert_eq!(NoticeKind::from_name("error"), Some(NoticeKind::Danger));
        assert_eq!(NoticeKind::from_name("success"), Some(NoticeKind::Success));
        assert_eq!(NoticeKind::from_name("shout"), None);
    }
}
