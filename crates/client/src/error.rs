use thiserror::Error;

#[derive(Debug, Error)]
pub enum ControllerError {
    #[error("only one image can be attached at a time")]
    ImageAttached,

    #[error("upload failed: {0}")]
    Upload(String),

    #[error("no uploaded file with id {0}")]
    UnknownFile(String),

    #[error("extraction already in progress for {0}")]
    ExtractionInProgress(String),
}
