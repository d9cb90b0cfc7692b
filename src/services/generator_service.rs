use async_trait::async_trait;
use std::sync::Arc;

use crate::{
    constants::quiz_prompt::build_quiz_prompt,
    errors::{AppError, AppResult},
    models::domain::Quiz,
};

/// Prompt used to probe candidate models at startup.
pub const PROBE_PROMPT: &str = "Say 'Hello' in one word.";

/// Seam between the quiz pipeline and the generative backend.
#[async_trait]
pub trait TextModel: Send + Sync {
    async fn generate(&self, model: &str, prompt: &str) -> AppResult<String>;
}

/// Walks an ordered candidate list and returns the first model that answers a
/// trivial probe. Selection happens once at startup; generation failures later
/// are never retried against other candidates.
pub async fn select_model(backend: &dyn TextModel, candidates: &[String]) -> AppResult<String> {
    for model in candidates {
        log::info!("Probing candidate model: {}", model);
        match backend.generate(model, PROBE_PROMPT).await {
            Ok(reply) if !reply.trim().is_empty() => {
                log::info!("Selected model: {}", model);
                return Ok(model.clone());
            }
            Ok(_) => log::warn!("Model {} returned an empty probe response", model),
            Err(err) => log::warn!("Model {} failed probe: {}", model, err),
        }
    }

    Err(AppError::ConfigurationError(
        "No working generative model found among configured candidates".to_string(),
    ))
}

/// Turns a prompt into a validated Quiz, or fails deterministically. The
/// selected model name is immutable for the process lifetime.
pub struct QuizGenerator {
    backend: Arc<dyn TextModel>,
    model: String,
}

impl QuizGenerator {
    pub async fn new(backend: Arc<dyn TextModel>, candidates: &[String]) -> AppResult<Self> {
        let model = select_model(backend.as_ref(), candidates).await?;
        Ok(Self { backend, model })
    }

    /// Bypasses model selection. Intended for tests.
    pub fn with_model(backend: Arc<dyn TextModel>, model: impl Into<String>) -> Self {
        Self {
            backend,
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub async fn generate_quiz(&self, title: &str, content: &str) -> AppResult<Quiz> {
        let prompt = build_quiz_prompt(title, content);
        log::info!("Requesting quiz from model {}", self.model);

        let raw = self.backend.generate(&self.model, &prompt).await?;
        parse_quiz_response(&raw)
    }
}

/// Strips a surrounding markdown code fence, with or without a `json` tag.
pub fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let trimmed = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    trimmed.strip_suffix("```").unwrap_or(trimmed).trim()
}

/// Parses and validates a raw model response. Non-JSON text fails with
/// `MalformedResponse` carrying the original raw text; structurally incomplete
/// JSON fails with `ValidationError` naming the first missing field.
pub fn parse_quiz_response(raw: &str) -> AppResult<Quiz> {
    let cleaned = strip_code_fences(raw);

    let value: serde_json::Value = serde_json::from_str(cleaned).map_err(|err| {
        log::error!("Model returned non-JSON output: {}", raw);
        AppError::MalformedResponse {
            reason: format!("Failed to parse model response as JSON: {err}"),
            raw: raw.to_string(),
        }
    })?;

    let quiz = Quiz::from_value(value)?;

    for question in &quiz.questions {
        if !question.options.contains(&question.correct_answer) {
            // Accepted as-is; the schema only asserts this by prompt instruction.
            log::warn!(
                "Correct answer {:?} is not among the options for question {:?}",
                question.correct_answer,
                question.question
            );
        }
    }

    Ok(quiz)
}
