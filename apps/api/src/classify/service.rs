use serde_json::Value;
use tracing::debug;

use crate::errors::AppError;
use crate::models::classify::ClassifyResponse;
use crate::state::AppState;
use crate::text::{normalize, normalize_value};

pub const EMPTY_RESUME_MESSAGE: &str =
    "Please paste your resume content to get a recommendation.";

/// Rejects requests with nothing to classify: a missing or null `raw_text`,
/// or a string of whitespace. Other JSON values pass through and normalize to `""`.
pub fn validate_raw_text(raw: &Value) -> Result<(), AppError> {
    match raw {
        Value::Null => Err(AppError::Validation(EMPTY_RESUME_MESSAGE.to_string())),
        Value::String(text) if text.trim().is_empty() => {
            Err(AppError::Validation(EMPTY_RESUME_MESSAGE.to_string()))
        }
        _ => Ok(()),
    }
}

pub fn classify_value(state: &AppState, raw: &Value) -> Result<ClassifyResponse, AppError> {
    validate_raw_text(raw)?;
    let normalized_text = normalize_value(raw, &state.resources);
    predict_normalized(state, normalized_text)
}

pub fn classify_text(state: &AppState, raw: &str) -> Result<ClassifyResponse, AppError> {
    if raw.trim().is_empty() {
        return Err(AppError::Validation(EMPTY_RESUME_MESSAGE.to_string()));
    }
    let normalized_text = normalize(raw, &state.resources);
    predict_normalized(state, normalized_text)
}

fn predict_normalized(
    state: &AppState,
    normalized_text: String,
) -> Result<ClassifyResponse, AppError> {
    debug!(
        "Normalized resume to {} tokens",
        normalized_text.split_whitespace().count()
    );
    let category = state.engine.predict(&normalized_text)?;
    Ok(ClassifyResponse {
        category,
        normalized_text,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::fixture_state;
    use serde_json::json;

    #[test]
    fn test_classify_value_string() {
        let state = fixture_state();
        let resp = classify_value(
            &state,
            &json!("Data analysis with Python and machine learning models"),
        )
        .unwrap();
        assert_eq!(resp.category.as_str(), "Data Science");
        assert_eq!(resp.normalized_text, "data analysis python machine learning model");
    }

    #[test]
    fn test_null_and_blank_are_rejected() {
        let state = fixture_state();
        for raw in [Value::Null, json!(""), json!("  \n ")] {
            let err = classify_value(&state, &raw).unwrap_err();
            assert!(matches!(err, AppError::Validation(ref msg) if msg == EMPTY_RESUME_MESSAGE));
        }
    }

    #[test]
    fn test_non_string_value_classifies_as_empty_text() {
        let state = fixture_state();
        let resp = classify_value(&state, &json!(42)).unwrap();
        assert_eq!(resp.normalized_text, "");
        assert_eq!(resp.category, state.engine.predict("").unwrap());
    }

    #[test]
    fn test_only_stopwords_still_classifies() {
        let state = fixture_state();
        let resp = classify_value(&state, &json!("the and of")).unwrap();
        assert_eq!(resp.normalized_text, "");
    }

    #[test]
    fn test_classify_text_rejects_blank() {
        let state = fixture_state();
        assert!(matches!(
            classify_text(&state, "\n\t"),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_classify_text() {
        let state = fixture_state();
        let resp = classify_text(&state, "Senior Java developer, Spring Boot").unwrap();
        assert_eq!(resp.category.as_str(), "Java Developer");
    }
}
