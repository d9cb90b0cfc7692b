use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::domain::QuizRecordSummary;

#[derive(Debug, Clone, Serialize)]
pub struct QuizHistoryItemDto {
    pub id: i64,
    pub url: String,
    pub title: String,
    pub date_generated: DateTime<Utc>,
}

impl From<QuizRecordSummary> for QuizHistoryItemDto {
    fn from(summary: QuizRecordSummary) -> Self {
        QuizHistoryItemDto {
            id: summary.id,
            url: summary.url,
            title: summary.title,
            date_generated: summary.date_generated,
        }
    }
}
