//! Loading local files into the execution context's file bucket.

use std::path::{Path, PathBuf};

use prestige_domain::StagedFile;
use tracing::debug;

/// Error type for file staging.
#[derive(Debug, thiserror::Error)]
pub enum StagingError {
    /// The path has no file name to stage the file under.
    #[error("Not a file path: {}", .0.display())]
    NoFileName(PathBuf),

    /// Failed to read the file.
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        /// File that could not be read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },
}

/// Reads a file and stages it under its file name, guessing its MIME type
/// from the extension.
///
/// # Errors
///
/// Returns an error if the path has no file name or cannot be read.
pub async fn stage_file(path: &Path) -> Result<StagedFile, StagingError> {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| StagingError::NoFileName(path.to_path_buf()))?;

    let bytes = tokio::fs::read(path).await.map_err(|source| StagingError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let mime_type = mime_guess::from_path(path).first_or_octet_stream().to_string();
    debug!(%name, %mime_type, size = bytes.len(), "staged file");

    Ok(StagedFile { name, mime_type, bytes })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[tokio::test]
    async fn stages_with_guessed_type() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("avatar.png");
        std::fs::write(&path, [137, 80, 78, 71]).unwrap();

        let file = stage_file(&path).await.unwrap();
        assert_eq!(file.name, "avatar.png");
        assert_eq!(file.mime_type, "image/png");
        assert_eq!(file.bytes, vec![137, 80, 78, 71]);
    }

    #[tokio::test]
    async fn unknown_extension_is_octet_stream() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("blob.zzq");
        std::fs::write(&path, b"x").unwrap();
        assert_eq!(stage_file(&path).await.unwrap().mime_type, "application/octet-stream");
    }

    #[tokio::test]
    async fn missing_file_is_reported() {
        let dir = TempDir::new().unwrap();
        let err = stage_file(&dir.path().join("gone.txt")).await.unwrap_err();
        assert!(err.to_string().starts_with("Failed to read"));
    }
}
