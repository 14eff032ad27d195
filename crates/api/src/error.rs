use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use extract::ExtractError;
use serde::Serialize;
use store::ResolveError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("fileId is required in the request body")]
    MissingFileId,

    #[error("file identifier matches more than one stored file")]
    AmbiguousFileId,

    #[error("file not found")]
    FileNotFound,

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<ResolveError> for ApiError {
    fn from(err: ResolveError) -> Self {
        match err {
            ResolveError::NotFound => ApiError::FileNotFound,
            ResolveError::Ambiguous { .. } => ApiError::AmbiguousFileId,
            ResolveError::Io(e) => ApiError::Internal(e.into()),
        }
    }
}

impl From<ExtractError> for ApiError {
    fn from(err: ExtractError) -> Self {
        ApiError::Internal(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::MissingFileId | ApiError::AmbiguousFileId => {
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            ApiError::FileNotFound => (StatusCode::NOT_FOUND, self.to_string()),
            // Internal causes are logged with full context and surfaced to
            // the client only as a generic message.
            ApiError::Internal(cause) => {
                tracing::error!(error = ?cause, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "an error occurred during character extraction".to_string(),
                )
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
