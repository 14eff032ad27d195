use crate::error::ApiError;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use extract::{ExtractionResult, Extractor};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use store::DocumentStore;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub struct AppState {
    pub store: DocumentStore,
    pub extractor: Extractor,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/extract", post(extract_characters))
        .route("/api/upload", post(upload_document))
        .route("/api/files", get(list_files))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

#[derive(Deserialize)]
pub struct ExtractRequest {
    #[serde(rename = "fileId")]
    pub file_id: Option<String>,
}

/// The extraction route: resolve the identifier, read the story, run one
/// generation call, return the validated characters. Stateless per request.
pub async fn extract_characters(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ExtractRequest>,
) -> Result<Json<ExtractionResult>, ApiError> {
    let file_id = match req.file_id.as_deref().map(str::trim) {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => return Err(ApiError::MissingFileId),
    };

    let path = state.store.resolve(&file_id).await?;
    let content = state.store.read_content(&path).await?;

    tracing::info!(file_id = %file_id, bytes = content.len(), "extracting characters");
    let result = state.extractor.extract_characters(&content).await?;

    tracing::info!(
        file_id = %file_id,
        characters = result.characters.len(),
        "extraction complete"
    );
    Ok(Json(result))
}

#[derive(Deserialize)]
pub struct UploadRequest {
    pub name: String,
    pub content: String,
}

#[derive(Serialize)]
pub struct UploadResponse {
    pub id: String,
    pub name: String,
}

pub async fn upload_document(
    State(state): State<Arc<AppState>>,
    Json(req): Json<UploadRequest>,
) -> Result<Json<UploadResponse>, ApiError> {
    let stored = state.store.store(&req.name, &req.content).await?;
    Ok(Json(UploadResponse {
        id: stored.id,
        name: stored.name,
    }))
}

#[derive(Serialize)]
pub struct FilesResponse {
    pub files: Vec<String>,
}

pub async fn list_files(
    State(state): State<Arc<AppState>>,
) -> Result<Json<FilesResponse>, ApiError> {
    let files = state.store.list().await?;
    Ok(Json(FilesResponse { files }))
}
