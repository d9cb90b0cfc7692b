use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};

/// Required top-level fields, checked in this order so the first missing one
/// is the one named in the error.
pub const REQUIRED_QUIZ_FIELDS: [&str; 5] =
    ["title", "summary", "key_entities", "related_topics", "questions"];

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct KeyEntity {
    pub name: String,
    pub description: String,
    pub relevance: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Question {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: String,
    pub explanation: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Quiz {
    pub title: String,
    pub summary: String,
    pub key_entities: Vec<KeyEntity>,
    pub related_topics: Vec<String>,
    pub questions: Vec<Question>,
}

impl Quiz {
    /// Builds a Quiz from already-parsed JSON, rejecting partial structures.
    pub fn from_value(value: serde_json::Value) -> AppResult<Self> {
        let object = value.as_object().ok_or_else(|| {
            AppError::ValidationError("Quiz payload must be a JSON object".to_string())
        })?;

        for field in REQUIRED_QUIZ_FIELDS {
            if !object.contains_key(field) {
                return Err(AppError::ValidationError(format!(
                    "Missing required field: {field}"
                )));
            }
        }

        serde_json::from_value(value)
            .map_err(|err| AppError::ValidationError(format!("Invalid quiz structure: {err}")))
    }
}
