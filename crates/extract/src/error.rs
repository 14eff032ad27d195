use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("generation service call failed: {0}")]
    Service(String),

    #[error("generation service returned no output text")]
    EmptyOutput,

    #[error("generation output is not valid JSON: {0}")]
    MalformedOutput(String),

    #[error("generation output violates the character schema: {0}")]
    SchemaViolation(String),
}
