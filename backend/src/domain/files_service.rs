//! File proxy use-cases.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info};

use crate::domain::Error;
use crate::domain::ports::{FilePath, FileStore, FilesProxy, StoredFile, Upload};

/// File service implementing [`FilesProxy`] over a [`FileStore`].
#[derive(Clone)]
pub struct FilesService<S> {
    store: Arc<S>,
    max_upload_bytes: usize,
}

impl<S> FilesService<S> {
    /// Create a service rejecting uploads larger than `max_upload_bytes`.
    pub fn new(store: Arc<S>, max_upload_bytes: usize) -> Self {
        Self {
            store,
            max_upload_bytes,
        }
    }
}

#[async_trait]
impl<S> FilesProxy for FilesService<S>
where
    S: FileStore,
{
    async fn fetch_file(&self, path: &str) -> Result<StoredFile, Error> {
        let path = FilePath::parse(path).map_err(|err| {
            debug!(%path, error = %err, "rejected file path");
            Error::invalid_request(err.to_string())
        })?;
        Ok(self.store.fetch_file(&path).await?)
    }

    async fn upload_images(&self, upload: Upload) -> Result<Value, Error> {
        if upload.body.is_empty() {
            return Err(Error::invalid_request("upload body must not be empty"));
        }
        if upload.body.len() > self.max_upload_bytes {
            return Err(Error::invalid_request(format!(
                "upload exceeds {} bytes",
                self.max_upload_bytes
            )));
        }
        let size = upload.body.len();
        let reply = self.store.upload_images(upload).await?;
        info!(bytes = size, "images uploaded");
        Ok(reply)
    }
}
