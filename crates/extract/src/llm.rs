use crate::error::ExtractError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Output-format block constraining the response to a JSON schema.
#[derive(Debug, Clone, Serialize)]
pub struct OutputFormat {
    pub format: SchemaFormat,
}

#[derive(Debug, Clone, Serialize)]
pub struct SchemaFormat {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub schema: Value,
    pub strict: bool,
}

impl SchemaFormat {
    pub fn json_schema(name: impl Into<String>, schema: Value) -> Self {
        Self {
            kind: "json_schema".to_string(),
            name: name.into(),
            schema,
            strict: true,
        }
    }
}

/// A single schema-constrained generation request.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationRequest {
    pub model: String,
    pub input: Vec<Message>,
    pub text: OutputFormat,
    pub temperature: f32,
}

#[derive(Debug, Deserialize)]
pub struct GenerationResponse {
    pub output_text: Option<String>,
}

/// Transport seam for the generation service.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    async fn generate(&self, request: &GenerationRequest)
        -> Result<GenerationResponse, ExtractError>;
}

/// HTTP client for the generation service.
///
/// One round trip per request: no retry, no client-side timeout. The call
/// blocks until the service answers or the transport fails.
#[derive(Clone)]
pub struct GenerationClient {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl GenerationClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl GenerationBackend for GenerationClient {
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResponse, ExtractError> {
        let url = format!("{}/responses", self.base_url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| ExtractError::Service(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ExtractError::Service(format!(
                "generation service returned {}: {}",
                status, body
            )));
        }

        response
            .json::<GenerationResponse>()
            .await
            .map_err(|e| ExtractError::Service(e.to_string()))
    }
}
