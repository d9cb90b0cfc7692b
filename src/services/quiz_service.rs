use std::sync::Arc;

use crate::{
    errors::{AppError, AppResult},
    models::domain::{NewQuizRecord, Quiz, QuizRecordSummary},
    repositories::QuizRecordRepository,
    services::{
        generator_service::QuizGenerator,
        scrape_service::{self, ScrapedArticle},
    },
};

/// Composes the four pipeline stages: fetch/extract, prompt + generate,
/// validate, persist. One sequential pass per request, fail-fast throughout.
pub struct QuizService {
    http: reqwest::Client,
    generator: Arc<QuizGenerator>,
    repository: Arc<dyn QuizRecordRepository>,
}

impl QuizService {
    pub fn new(
        http: reqwest::Client,
        generator: Arc<QuizGenerator>,
        repository: Arc<dyn QuizRecordRepository>,
    ) -> Self {
        Self {
            http,
            generator,
            repository,
        }
    }

    pub async fn create_quiz(&self, url: &str) -> AppResult<Quiz> {
        let article = scrape_service::scrape_wikipedia(&self.http, url).await?;
        self.generate_and_store(url, article).await
    }

    /// Generation and persistence for an already-extracted article. Nothing is
    /// persisted unless the quiz passed validation first.
    pub async fn generate_and_store(&self, url: &str, article: ScrapedArticle) -> AppResult<Quiz> {
        let quiz = self
            .generator
            .generate_quiz(&article.title, &article.content)
            .await?;
        log::info!("Generated quiz with {} questions", quiz.questions.len());

        let payload = serde_json::to_string(&quiz)
            .map_err(|err| AppError::InternalError(format!("Failed to serialize quiz: {err}")))?;

        let id = self
            .repository
            .insert(NewQuizRecord {
                url: url.to_string(),
                title: article.title,
                scraped_content: article.content,
                full_quiz_data: payload,
            })
            .await?;
        log::info!("Quiz saved to database with id {}", id);

        Ok(quiz)
    }

    pub async fn history(&self) -> AppResult<Vec<QuizRecordSummary>> {
        self.repository.list_all().await
    }

    pub async fn get_quiz(&self, id: i64) -> AppResult<Quiz> {
        let record = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Quiz with id '{}' not found", id)))?;

        serde_json::from_str(&record.full_quiz_data).map_err(|err| {
            // A write-time invariant was violated; treat as an integrity alarm.
            log::error!(
                "Stored payload for quiz {} failed to deserialize: {}",
                id,
                err
            );
            AppError::CorruptRecord(format!("Stored quiz {} has an unreadable payload", id))
        })
    }
}
