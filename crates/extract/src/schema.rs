use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// A named character extracted from a story.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Character {
    pub name: String,
    pub description: String,
    pub traits: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub characters: Vec<Character>,
}

/// Strict output schema for character extraction.
///
/// The generation service's strict mode needs `additionalProperties: false`
/// on every object and every property listed in `required`.
pub fn character_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "characters": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "name": {
                            "type": "string",
                            "description": "The name of the character"
                        },
                        "description": {
                            "type": "string",
                            "description": "A detailed physical and background description of the character"
                        },
                        "traits": {
                            "type": "array",
                            "items": { "type": "string" },
                            "description": "Key personality traits and characteristics of the character"
                        }
                    },
                    "required": ["name", "description", "traits"],
                    "additionalProperties": false
                }
            }
        },
        "required": ["characters"],
        "additionalProperties": false
    })
}
