//! [`FileStore`] over the backend's file and image upload endpoints.

use async_trait::async_trait;
use reqwest::Method;
use reqwest::header::{CONTENT_TYPE, HeaderMap};
use serde_json::Value;

use super::client::BackendApi;
use super::dto::decode_optional_json;
use crate::domain::ports::{
    BackendError, FALLBACK_CONTENT_TYPE, FilePath, FileStore, StoredFile, Upload,
};

fn content_type(headers: &HeaderMap) -> String {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.trim().is_empty())
        .unwrap_or(FALLBACK_CONTENT_TYPE)
        .to_owned()
}

#[async_trait]
impl FileStore for BackendApi {
    async fn fetch_file(&self, path: &FilePath) -> Result<StoredFile, BackendError> {
        let url = self.endpoint(std::iter::once("files").chain(path.as_str().split('/')))?;
        let reply = self.send(self.request(Method::GET, url)).await?;
        Ok(StoredFile {
            content_type: content_type(&reply.headers),
            bytes: reply.body,
        })
    }

    async fn upload_images(&self, upload: Upload) -> Result<Value, BackendError> {
        let url = self.endpoint(["api", "images", "upload-multiple"])?;
        let request = self
            .service_request(Method::POST, url)
            .header(CONTENT_TYPE, upload.content_type)
            .body(upload.body);
        let reply = self.send(request).await?;
        decode_optional_json(&reply.body).map_err(BackendError::decode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;
    use rstest::rstest;

    #[rstest]
    #[case(Some("image/png"), "image/png")]
    #[case(Some(" "), FALLBACK_CONTENT_TYPE)]
    #[case(None, FALLBACK_CONTENT_TYPE)]
    fn content_type_falls_back_to_octet_stream(
        #[case] header: Option<&'static str>,
        #[case] expected: &str,
    ) {
        let mut headers = HeaderMap::new();
        if let Some(value) = header {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static(value));
        }
        assert_eq!(content_type(&headers), expected);
    }
}
