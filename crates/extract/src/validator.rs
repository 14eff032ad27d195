use crate::error::ExtractError;
use crate::schema::ExtractionResult;

/// Parse raw generation output into a typed extraction result.
///
/// The service's strict mode is supposed to guarantee the shape, but the
/// result is validated locally anyway before any `Character` leaves this
/// module: typed deserialization enforces field presence and types, and the
/// pass below enforces the non-empty invariants the schema cannot express.
pub fn parse_extraction(raw: &str) -> Result<ExtractionResult, ExtractError> {
    let result: ExtractionResult =
        serde_json::from_str(raw).map_err(|e| ExtractError::MalformedOutput(e.to_string()))?;

    for (idx, character) in result.characters.iter().enumerate() {
        if character.name.trim().is_empty() {
            return Err(ExtractError::SchemaViolation(format!(
                "character {} has an empty name",
                idx
            )));
        }
        if character.description.trim().is_empty() {
            return Err(ExtractError::SchemaViolation(format!(
                "character {} ({}) has an empty description",
                idx, character.name
            )));
        }
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_conforming_output() {
        let raw = r#"{"characters":[
            {"name":"Renard","description":"A sly red fox","traits":["cunning","curious"]},
            {"name":"Isengrim","description":"An old grey wolf","traits":[]}
        ]}"#;

        let result = parse_extraction(raw).unwrap();
        assert_eq!(result.characters.len(), 2);
        assert_eq!(result.characters[0].name, "Renard");
        assert!(result.characters[1].traits.is_empty());
    }

    #[test]
    fn empty_character_list_is_valid() {
        let result = parse_extraction(r#"{"characters":[]}"#).unwrap();
        assert!(result.characters.is_empty());
    }

    #[test]
    fn invalid_json_is_malformed_output() {
        let err = parse_extraction("not json at all").unwrap_err();
        assert!(matches!(err, ExtractError::MalformedOutput(_)));
    }

    #[test]
    fn missing_field_is_malformed_output() {
        let raw = r#"{"characters":[{"name":"Renard","traits":[]}]}"#;
        let err = parse_extraction(raw).unwrap_err();
        assert!(matches!(err, ExtractError::MalformedOutput(_)));
    }

    #[test]
    fn blank_name_is_schema_violation() {
        let raw = r#"{"characters":[{"name":"  ","description":"someone","traits":[]}]}"#;
        let err = parse_extraction(raw).unwrap_err();
        assert!(matches!(err, ExtractError::SchemaViolation(_)));
    }

    #[test]
    fn blank_description_is_schema_violation() {
        let raw = r#"{"characters":[{"name":"Renard","description":"","traits":["sly"]}]}"#;
        let err = parse_extraction(raw).unwrap_err();
        assert!(matches!(err, ExtractError::SchemaViolation(_)));
    }
}
