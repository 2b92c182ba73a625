//! Driving port for file reads and image uploads.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::Error;

use super::{StoredFile, Upload};

/// Domain use-case port for the file proxy.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FilesProxy: Send + Sync {
    /// Fetch the file stored at the raw, unvalidated `path`.
    async fn fetch_file(&self, path: &str) -> Result<StoredFile, Error>;

    /// Forward an image upload.
    async fn upload_images(&self, upload: Upload) -> Result<Value, Error>;
}
