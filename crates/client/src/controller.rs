use crate::error::ControllerError;
use crate::state::{ExtractionState, StateStore};
use async_trait::async_trait;
use extract::ExtractionResult;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

/// An uploaded file as the UI sees it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileUiEntry {
    pub id: String,
    pub name: String,
}

/// Upload collaborator: accepts a raw file, returns its UI entry.
#[async_trait]
pub trait UploadApi: Send + Sync {
    async fn upload(&self, name: &str, content: &str) -> anyhow::Result<FileUiEntry>;
    async fn remove(&self, file_id: &str) -> anyhow::Result<()>;
}

/// Extraction collaborator: one call per file id, returns the characters.
#[async_trait]
pub trait ExtractionApi: Send + Sync {
    async fn extract(&self, file_id: &str) -> anyhow::Result<ExtractionResult>;
}

/// Client-side orchestrator for uploads and per-file extraction state.
///
/// Extraction calls for different file ids run concurrently and may settle in
/// any order; every completion is routed through the state store keyed by the
/// id it was issued for, so interleaving cannot cross-contaminate entries.
pub struct ExtractionController {
    upload_api: Arc<dyn UploadApi>,
    extraction_api: Arc<dyn ExtractionApi>,
    files: Mutex<Vec<FileUiEntry>>,
    image: Mutex<Option<FileUiEntry>>,
    states: StateStore,
}

impl ExtractionController {
    pub fn new(upload_api: Arc<dyn UploadApi>, extraction_api: Arc<dyn ExtractionApi>) -> Self {
        Self {
            upload_api,
            extraction_api,
            files: Mutex::new(Vec::new()),
            image: Mutex::new(None),
            states: StateStore::new(),
        }
    }

    pub fn files(&self) -> Vec<FileUiEntry> {
        self.files.lock().unwrap().clone()
    }

    pub fn attached_image(&self) -> Option<FileUiEntry> {
        self.image.lock().unwrap().clone()
    }

    /// State for a file id, for rendering and for disabling the extract
    /// control while an attempt is in flight.
    pub fn state(&self, file_id: &str) -> ExtractionState {
        self.states.get(file_id)
    }

    pub fn is_extracting(&self, file_id: &str) -> bool {
        self.states.is_extracting(file_id)
    }

    /// Upload a file through the collaborator.
    ///
    /// Only one image may be attached at a time: while the slot is occupied
    /// every upload is rejected before the collaborator is invoked.
    pub async fn upload(&self, name: &str, content: &str) -> Result<FileUiEntry, ControllerError> {
        if self.image.lock().unwrap().is_some() {
            tracing::warn!(name, "upload rejected, an image is already attached");
            return Err(ControllerError::ImageAttached);
        }

        let entry = self
            .upload_api
            .upload(name, content)
            .await
            .map_err(|e| ControllerError::Upload(e.to_string()))?;

        if is_image_name(name) {
            *self.image.lock().unwrap() = Some(entry.clone());
        } else {
            self.files.lock().unwrap().push(entry.clone());
        }

        tracing::info!(file_id = %entry.id, name, "uploaded file");
        Ok(entry)
    }

    /// Trigger character extraction for an uploaded file.
    ///
    /// A second trigger while the first is in flight is rejected without
    /// issuing another service call. Returns the state the attempt settled
    /// in; a failed attempt can be re-triggered manually.
    pub async fn extract(&self, file_id: &str) -> Result<ExtractionState, ControllerError> {
        if !self.files.lock().unwrap().iter().any(|f| f.id == file_id) {
            return Err(ControllerError::UnknownFile(file_id.to_string()));
        }

        if !self.states.begin(file_id) {
            return Err(ControllerError::ExtractionInProgress(file_id.to_string()));
        }

        // No lock is held across the await; completions for other ids may
        // interleave here freely.
        match self.extraction_api.extract(file_id).await {
            Ok(result) => {
                self.states.complete(file_id, result);
            }
            Err(e) => {
                tracing::error!(file_id, error = %e, "character extraction failed");
                self.states.fail(file_id, e.to_string());
            }
        }

        Ok(self.states.get(file_id))
    }

    /// Remove an uploaded file and discard its extraction state. An
    /// extraction still in flight for it settles into nothing.
    pub async fn remove(&self, file_id: &str) -> Result<(), ControllerError> {
        self.upload_api
            .remove(file_id)
            .await
            .map_err(|e| ControllerError::Upload(e.to_string()))?;

        self.files.lock().unwrap().retain(|f| f.id != file_id);
        self.states.discard(file_id);
        Ok(())
    }

    pub fn detach_image(&self) {
        *self.image.lock().unwrap() = None;
    }
}

fn is_image_name(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    ["png", "jpg", "jpeg", "gif", "webp"]
        .iter()
        .any(|ext| lower.ends_with(&format!(".{}", ext)))
}
