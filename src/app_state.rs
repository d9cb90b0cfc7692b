use std::{sync::Arc, time::Duration};

use crate::{
    config::Config,
    db::Database,
    errors::{AppError, AppResult},
    repositories::MongoQuizRecordRepository,
    services::{gemini::GeminiClient, generator_service::QuizGenerator, quiz_service::QuizService},
};

#[derive(Clone)]
pub struct AppState {
    pub quiz_service: Arc<QuizService>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Connects to the store and selects a working generative model. Any
    /// failure here is fatal to process startup, not per-request.
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;

        let repository = Arc::new(MongoQuizRecordRepository::new(&db));
        repository.ensure_indexes().await?;

        let backend = Arc::new(GeminiClient::from_config(&config)?);
        let generator = Arc::new(QuizGenerator::new(backend, &config.gemini_models).await?);

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.fetch_timeout_secs))
            .build()
            .map_err(|err| {
                AppError::ConfigurationError(format!("Failed to build HTTP client: {err}"))
            })?;

        let quiz_service = Arc::new(QuizService::new(http, generator, repository));

        Ok(Self {
            quiz_service,
            config: Arc::new(config),
        })
    }
}
