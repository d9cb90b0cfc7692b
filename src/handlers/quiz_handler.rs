use actix_web::{get, post, web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    errors::AppError,
    models::dto::{GenerateQuizRequest, QuizHistoryItemDto},
};

#[get("/")]
pub async fn root() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "message": "AI Wiki Quiz Generator API is running!"
    }))
}

#[post("/generate_quiz")]
pub async fn generate_quiz(
    state: web::Data<AppState>,
    request: web::Json<GenerateQuizRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    log::info!("Received request to generate quiz for URL: {}", request.url);
    let quiz = state.quiz_service.create_quiz(&request.url).await?;
    Ok(HttpResponse::Ok().json(quiz))
}

#[get("/history")]
pub async fn get_history(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let items: Vec<QuizHistoryItemDto> = state
        .quiz_service
        .history()
        .await?
        .into_iter()
        .map(QuizHistoryItemDto::from)
        .collect();

    log::info!("Retrieved {} quizzes from history", items.len());
    Ok(HttpResponse::Ok().json(items))
}

#[get("/quiz/{id}")]
pub async fn get_quiz_by_id(
    state: web::Data<AppState>,
    id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let quiz = state.quiz_service.get_quiz(id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(quiz))
}

#[get("/health")]
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "message": "AI Wiki Quiz Generator API is running correctly",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
