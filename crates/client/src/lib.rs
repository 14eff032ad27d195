pub mod controller;
pub mod error;
pub mod http;
pub mod state;

pub use controller::{ExtractionApi, ExtractionController, FileUiEntry, UploadApi};
pub use error::ControllerError;
pub use http::{HttpExtractionApi, HttpUploadApi};
pub use state::{ExtractionState, StateStore};
