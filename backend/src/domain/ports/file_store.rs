//! Driven port for the backend's file storage.
//!
//! Files are read through the proxy so images share the front-end origin;
//! uploads are forwarded unchanged.

use std::fmt;

use async_trait::async_trait;
use serde_json::Value;

use super::BackendError;

/// Content type used when the backend does not declare one.
pub const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// Relative storage path, validated to stay inside the file root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePath(String);

/// Reasons a file path is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FilePathError {
    /// No non-empty segment remained.
    #[error("file path must not be empty")]
    Empty,
    /// A `.` or `..` segment was present.
    #[error("file path must not contain relative segments")]
    Traversal,
}

impl FilePath {
    /// Validate a slash-separated path, dropping empty segments.
    ///
    /// # Examples
    /// ```
    /// use historian::domain::ports::FilePath;
    ///
    /// let path = FilePath::parse("/uploads//2024/a.jpg").unwrap();
    /// assert_eq!(path.as_str(), "uploads/2024/a.jpg");
    /// assert!(FilePath::parse("uploads/../secret").is_err());
    /// ```
    pub fn parse(raw: &str) -> Result<Self, FilePathError> {
        let mut segments = Vec::new();
        for segment in raw.split('/').filter(|segment| !segment.is_empty()) {
            if segment == "." || segment == ".." {
                return Err(FilePathError::Traversal);
            }
            segments.push(segment);
        }
        if segments.is_empty() {
            return Err(FilePathError::Empty);
        }
        Ok(Self(segments.join("/")))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for FilePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// File bytes together with their declared media type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Opaque upload body, typically `multipart/form-data`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    /// Request content type including the multipart boundary.
    pub content_type: String,
    pub body: Vec<u8>,
}

/// Port for reading and uploading stored files.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Fetch a stored file.
    async fn fetch_file(&self, path: &FilePath) -> Result<StoredFile, BackendError>;

    /// Forward an image upload and return the backend's reply.
    async fn upload_images(&self, upload: Upload) -> Result<Value, BackendError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("a.jpg", "a.jpg")]
    #[case("/uploads/a.jpg", "uploads/a.jpg")]
    #[case("uploads//2024///a.jpg/", "uploads/2024/a.jpg")]
    fn normalizes_separators(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(FilePath::parse(raw).expect("valid path").as_str(), expected);
    }

    #[rstest]
    #[case("", FilePathError::Empty)]
    #[case("///", FilePathError::Empty)]
    #[case("../etc/passwd", FilePathError::Traversal)]
    #[case("uploads/./a.jpg", FilePathError::Traversal)]
    #[case("uploads/..", FilePathError::Traversal)]
    fn rejects_unsafe_paths(#[case] raw: &str, #[case] expected: FilePathError) {
        assert_eq!(FilePath::parse(raw), Err(expected));
    }
}
