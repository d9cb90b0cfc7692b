use std::sync::Arc;

use async_trait::async_trait;

use wikiquiz_server::errors::{AppError, AppResult};
use wikiquiz_server::services::generator_service::{
    select_model, QuizGenerator, TextModel, PROBE_PROMPT,
};

/// Backend whose named models either answer with a canned payload or fail.
struct ScriptedBackend {
    working_model: &'static str,
    payload: String,
}

#[async_trait]
impl TextModel for ScriptedBackend {
    async fn generate(&self, model: &str, prompt: &str) -> AppResult<String> {
        if model != self.working_model {
            return Err(AppError::GenerationError(format!(
                "model {model} is not available"
            )));
        }
        if prompt == PROBE_PROMPT {
            return Ok("Hello".to_string());
        }
        Ok(self.payload.clone())
    }
}

fn quiz_payload() -> String {
    serde_json::json!({
        "title": "Test Subject",
        "summary": "A summary of the test subject.",
        "key_entities": [
            {"name": "Entity", "description": "A thing", "relevance": "Central"}
        ],
        "related_topics": ["Topic A", "Topic B", "Topic C"],
        "questions": [
            {
                "question": "What is tested?",
                "options": ["A", "B", "C", "D"],
                "correct_answer": "A",
                "explanation": "Because A."
            }
        ]
    })
    .to_string()
}

fn candidates() -> Vec<String> {
    vec![
        "model-a".to_string(),
        "model-b".to_string(),
        "model-c".to_string(),
    ]
}

#[actix_rt::test]
async fn startup_selection_skips_failing_candidates() {
    let backend = ScriptedBackend {
        working_model: "model-b",
        payload: quiz_payload(),
    };

    let selected = select_model(&backend, &candidates()).await.unwrap();
    assert_eq!(selected, "model-b");
}

#[actix_rt::test]
async fn startup_selection_fails_when_no_candidate_works() {
    let backend = ScriptedBackend {
        working_model: "model-that-is-not-listed",
        payload: quiz_payload(),
    };

    let err = select_model(&backend, &candidates()).await.unwrap_err();
    assert!(matches!(err, AppError::ConfigurationError(_)));
}

#[actix_rt::test]
async fn generator_uses_the_selected_model_for_generation() {
    let backend = Arc::new(ScriptedBackend {
        working_model: "model-c",
        payload: format!("```json\n{}\n```", quiz_payload()),
    });

    let generator = QuizGenerator::new(backend, &candidates()).await.unwrap();
    assert_eq!(generator.model(), "model-c");

    let quiz = generator
        .generate_quiz("Test Subject", "Some extracted article content")
        .await
        .unwrap();
    assert_eq!(quiz.title, "Test Subject");
    assert_eq!(quiz.questions.len(), 1);
}

#[actix_rt::test]
async fn fenced_and_unfenced_payloads_yield_equal_quizzes() {
    let plain = Arc::new(ScriptedBackend {
        working_model: "model-a",
        payload: quiz_payload(),
    });
    let fenced = Arc::new(ScriptedBackend {
        working_model: "model-a",
        payload: format!("```json\n{}\n```", quiz_payload()),
    });

    let from_plain = QuizGenerator::with_model(plain, "model-a")
        .generate_quiz("Test Subject", "content")
        .await
        .unwrap();
    let from_fenced = QuizGenerator::with_model(fenced, "model-a")
        .generate_quiz("Test Subject", "content")
        .await
        .unwrap();

    assert_eq!(from_plain, from_fenced);
}

#[actix_rt::test]
async fn conversational_refusal_is_a_malformed_response() {
    let backend = Arc::new(ScriptedBackend {
        working_model: "model-a",
        payload: "Sorry, I can't help with that".to_string(),
    });

    let err = QuizGenerator::with_model(backend, "model-a")
        .generate_quiz("Test Subject", "content")
        .await
        .unwrap_err();

    match err {
        AppError::MalformedResponse { raw, .. } => {
            assert_eq!(raw, "Sorry, I can't help with that");
        }
        other => panic!("expected MalformedResponse, got {other:?}"),
    }
}

#[actix_rt::test]
async fn incomplete_json_names_the_missing_field() {
    let mut value: serde_json::Value = serde_json::from_str(&quiz_payload()).unwrap();
    value.as_object_mut().unwrap().remove("related_topics");

    let backend = Arc::new(ScriptedBackend {
        working_model: "model-a",
        payload: value.to_string(),
    });

    let err = QuizGenerator::with_model(backend, "model-a")
        .generate_quiz("Test Subject", "content")
        .await
        .unwrap_err();

    match err {
        AppError::ValidationError(message) => {
            assert_eq!(message, "Missing required field: related_topics");
        }
        other => panic!("expected ValidationError, got {other:?}"),
    }
}
