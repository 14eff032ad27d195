use crate::controller::{ExtractionApi, FileUiEntry, UploadApi};
use anyhow::Context;
use async_trait::async_trait;
use extract::ExtractionResult;
use serde::Deserialize;
use serde_json::json;

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Extraction endpoint client. Non-success responses surface the server's
/// `{ "error": ... }` message so it can be shown to the user verbatim.
pub struct HttpExtractionApi {
    base_url: String,
    client: reqwest::Client,
}

impl HttpExtractionApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl ExtractionApi for HttpExtractionApi {
    async fn extract(&self, file_id: &str) -> anyhow::Result<ExtractionResult> {
        let response = self
            .client
            .post(format!("{}/api/extract", self.base_url))
            .json(&json!({ "fileId": file_id }))
            .send()
            .await
            .context("extraction request failed")?;

        if !response.status().is_success() {
            let message = response
                .json::<ErrorBody>()
                .await
                .map(|b| b.error)
                .unwrap_or_else(|_| "failed to extract characters".to_string());
            anyhow::bail!(message);
        }

        response
            .json::<ExtractionResult>()
            .await
            .context("invalid extraction response body")
    }
}

/// Upload endpoint client.
pub struct HttpUploadApi {
    base_url: String,
    client: reqwest::Client,
}

impl HttpUploadApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl UploadApi for HttpUploadApi {
    async fn upload(&self, name: &str, content: &str) -> anyhow::Result<FileUiEntry> {
        let response = self
            .client
            .post(format!("{}/api/upload", self.base_url))
            .json(&json!({ "name": name, "content": content }))
            .send()
            .await
            .context("upload request failed")?;

        if !response.status().is_success() {
            let message = response
                .json::<ErrorBody>()
                .await
                .map(|b| b.error)
                .unwrap_or_else(|_| "upload failed".to_string());
            anyhow::bail!(message);
        }

        response
            .json::<FileUiEntry>()
            .await
            .context("invalid upload response body")
    }

    // Removal only drops the file from the client's view; stored documents
    // are retained server-side and deletion stays the storage service's call.
    async fn remove(&self, file_id: &str) -> anyhow::Result<()> {
        tracing::debug!(file_id, "removed file from client view");
        Ok(())
    }
}
