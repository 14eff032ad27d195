pub mod error;
pub mod llm;
pub mod prompt;
pub mod schema;
pub mod validator;

pub use error::ExtractError;
pub use llm::{GenerationBackend, GenerationClient, GenerationRequest, GenerationResponse};
pub use schema::{Character, ExtractionResult};

use std::sync::Arc;

pub const DEFAULT_MODEL: &str = "gpt-4o-2024-08-06";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Character extraction pipeline: prompt construction, one generation call,
/// response validation.
pub struct Extractor {
    backend: Arc<dyn GenerationBackend>,
    model: String,
    temperature: f32,
}

impl Extractor {
    pub fn new(backend: Arc<dyn GenerationBackend>, model: impl Into<String>, temperature: f32) -> Self {
        Self {
            backend,
            model: model.into(),
            temperature,
        }
    }

    /// Extract all named characters from a story.
    pub async fn extract_characters(&self, content: &str) -> Result<ExtractionResult, ExtractError> {
        let request = prompt::build_request(content, &self.model, self.temperature);

        let response = self.backend.generate(&request).await?;

        let raw = match response.output_text {
            Some(text) if !text.trim().is_empty() => text,
            _ => return Err(ExtractError::EmptyOutput),
        };

        let result = validator::parse_extraction(&raw)?;
        tracing::debug!(characters = result.characters.len(), "extraction parsed");

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct MockBackend {
        output: Option<String>,
        last_request: Mutex<Option<GenerationRequest>>,
    }

    impl MockBackend {
        fn returning(output: Option<&str>) -> Self {
            Self {
                output: output.map(str::to_string),
                last_request: Mutex::new(None),
            }
        }
    }

    #[async_trait]
    impl GenerationBackend for MockBackend {
        async fn generate(
            &self,
            request: &GenerationRequest,
        ) -> Result<GenerationResponse, ExtractError> {
            *self.last_request.lock().unwrap() = Some(request.clone());
            Ok(GenerationResponse {
                output_text: self.output.clone(),
            })
        }
    }

    fn extractor(backend: Arc<MockBackend>) -> Extractor {
        Extractor::new(backend, DEFAULT_MODEL, DEFAULT_TEMPERATURE)
    }

    #[tokio::test]
    async fn extracts_characters_from_valid_output() {
        let backend = Arc::new(MockBackend::returning(Some(
            r#"{"characters":[{"name":"Ahab","description":"An obsessed whaling captain","traits":["obsessive","commanding"]}]}"#,
        )));

        let result = extractor(backend.clone())
            .extract_characters("Call me Ishmael.")
            .await
            .unwrap();

        assert_eq!(result.characters.len(), 1);
        assert_eq!(result.characters[0].name, "Ahab");

        // The whole story and the fixed sampling settings go out in the request.
        let request = backend.last_request.lock().unwrap().take().unwrap();
        assert!(request.input[1].content.contains("Call me Ishmael."));
        assert_eq!(request.model, DEFAULT_MODEL);
        assert_eq!(request.temperature, DEFAULT_TEMPERATURE);
    }

    #[tokio::test]
    async fn absent_output_text_is_empty_output() {
        let backend = Arc::new(MockBackend::returning(None));
        let err = extractor(backend).extract_characters("text").await.unwrap_err();
        assert!(matches!(err, ExtractError::EmptyOutput));
    }

    #[tokio::test]
    async fn blank_output_text_is_empty_output() {
        let backend = Arc::new(MockBackend::returning(Some("   ")));
        let err = extractor(backend).extract_characters("text").await.unwrap_err();
        assert!(matches!(err, ExtractError::EmptyOutput));
    }

    #[tokio::test]
    async fn malformed_output_propagates() {
        let backend = Arc::new(MockBackend::returning(Some("```json not really```")));
        let err = extractor(backend).extract_characters("text").await.unwrap_err();
        assert!(matches!(err, ExtractError::MalformedOutput(_)));
    }
}
