use crate::llm::{GenerationRequest, Message, OutputFormat, SchemaFormat};
use crate::schema;

pub const SYSTEM_INSTRUCTION: &str = "You are a literary analysis expert who extracts \
character information from stories. Extract all main characters with their name, \
description, and personality traits in a structured format.";

/// Embed the entire story in one user message. No truncation or chunking:
/// a document larger than the model's context window fails at the service.
pub fn build_user_message(content: &str) -> String {
    format!(
        "Extract all the main characters from the following story. For each character, \
provide their name, a detailed description (including physical attributes and \
background), and key personality traits.\n\nHere's the story:\n{}",
        content
    )
}

pub fn build_request(content: &str, model: &str, temperature: f32) -> GenerationRequest {
    GenerationRequest {
        model: model.to_string(),
        input: vec![
            Message::system(SYSTEM_INSTRUCTION),
            Message::user(build_user_message(content)),
        ],
        text: OutputFormat {
            format: SchemaFormat::json_schema("character_extraction", schema::character_schema()),
        },
        temperature,
    }
}
