//! Pre-parse normalization and schema validation of raw model output.
//!
//! Two distinct failure classes, both retryable upstream: `Malformed` (the
//! text does not parse as the expected record) and `Schema` (it parses, but a
//! required field is absent or an enumerated value is outside its closed set).

use std::borrow::Cow;

use serde::de::DeserializeOwned;
use thiserror::Error;

/// A model output record with a closed-vocabulary contract.
///
/// `validate` must reject out-of-set values, never coerce them — a retry with
/// the same prompt is the only correction path.
pub trait ValidatedOutput: DeserializeOwned {
    fn validate(&self) -> Result<(), String>;
}

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("model output is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("model output violates the schema: {0}")]
    Schema(String),
}

/// Removes markdown code-fence markers anywhere in the text and trims.
///
/// Part of the validator contract, not an incidental patch: models
/// intermittently wrap the JSON in fenced blocks and the parser must see the
/// bare object. Anything else around the fences is left in place — prose
/// before or after the object still fails the parse, which is correct.
pub fn strip_code_fences(raw: &str) -> Cow<'_, str> {
    let trimmed = raw.trim();
    if !trimmed.contains("```") {
        return Cow::Borrowed(trimmed);
    }
    Cow::Owned(
        trimmed
            .replace("```json", "")
            .replace("```", "")
            .trim()
            .to_string(),
    )
}

/// Parses raw model output into `T` and validates it against its vocabulary.
pub fn parse_validated<T: ValidatedOutput>(raw: &str) -> Result<T, OutputError> {
    let cleaned = strip_code_fences(raw);
    let record: T = serde_json::from_str(&cleaned)?;
    record.validate().map_err(OutputError::Schema)?;
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::models::ExtractionResult;

    #[test]
    fn test_strip_fences_with_json_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_code_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_fences_without_tag() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_code_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_fences_no_fences_trims_only() {
        let input = "  {\"key\": \"value\"}\n";
        assert_eq!(strip_code_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_fences_keeps_surrounding_prose() {
        // prose stays, so the parse still fails and triggers a retry
        let input = "Here you go:\n```json\n{}\n```";
        assert_eq!(strip_code_fences(input), "Here you go:\n\n{}");
    }

    #[test]
    fn test_parse_validated_accepts_fenced_record() {
        let raw = "```json\n{\"job_title\": \"Engineer\", \"city\": null, \"work_arrangement\": \"remote\", \"experience\": null}\n```";
        let result: ExtractionResult = parse_validated(raw).unwrap();
        assert_eq!(result.work_arrangement.as_deref(), Some("remote"));
    }

    #[test]
    fn test_parse_validated_classifies_non_json_as_malformed() {
        let err = parse_validated::<ExtractionResult>("I could not find the posting.").unwrap_err();
        assert!(matches!(err, OutputError::Malformed(_)));
    }

    #[test]
    fn test_parse_validated_classifies_bad_enum_as_schema() {
        let raw = r#"{"job_title": "Engineer", "city": null, "work_arrangement": "Remote", "experience": null}"#;
        let err = parse_validated::<ExtractionResult>(raw).unwrap_err();
        assert!(matches!(err, OutputError::Schema(_)));
    }

    #[test]
    fn test_parse_validated_classifies_missing_field_as_schema() {
        let raw = r#"{"city": "Austin, TX"}"#;
        let err = parse_validated::<ExtractionResult>(raw).unwrap_err();
        assert!(matches!(err, OutputError::Schema(_)));
    }

    #[test]
    fn test_round_trip_preserves_already_valid_output() {
        let raw = r#"{"job_title":"Data Engineer, Google Fi and Store, Infrastructure","city":"Mountain View, CA","work_arrangement":"on-site","experience":"Mid (3-5 Years)"}"#;
        let result: ExtractionResult = parse_validated(raw).unwrap();
        let reserialized = serde_json::to_value(&result).unwrap();
        let original: serde_json::Value = serde_json::from_str(raw).unwrap();
        assert_eq!(reserialized, original);
    }
}
