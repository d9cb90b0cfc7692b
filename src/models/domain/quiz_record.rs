use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One persisted quiz plus its provenance. Immutable after creation; the id is
/// assigned by the store and is unique and monotonic.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuizRecord {
    pub id: i64,
    pub url: String,
    pub title: String,
    pub date_generated: DateTime<Utc>,
    pub scraped_content: String,
    /// Lossless serialization of a Quiz that passed validation at write time.
    pub full_quiz_data: String,
}

/// Fields supplied by the pipeline; id and timestamp are assigned at insert.
#[derive(Clone, Debug)]
pub struct NewQuizRecord {
    pub url: String,
    pub title: String,
    pub scraped_content: String,
    pub full_quiz_data: String,
}

/// History view of a record, without the raw text and full payload.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuizRecordSummary {
    pub id: i64,
    pub url: String,
    pub title: String,
    pub date_generated: DateTime<Utc>,
}

impl From<&QuizRecord> for QuizRecordSummary {
    fn from(record: &QuizRecord) -> Self {
        QuizRecordSummary {
            id: record.id,
            url: record.url.clone(),
            title: record.title.clone(),
            date_generated: record.date_generated,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_drops_payload_fields() {
        let record = QuizRecord {
            id: 3,
            url: "https://en.wikipedia.org/wiki/Ada_Lovelace".to_string(),
            title: "Ada Lovelace".to_string(),
            date_generated: Utc::now(),
            scraped_content: "Ada Lovelace was an English mathematician.".to_string(),
            full_quiz_data: "{}".to_string(),
        };

        let summary = QuizRecordSummary::from(&record);
        assert_eq!(summary.id, 3);
        assert_eq!(summary.title, "Ada Lovelace");
        assert_eq!(summary.date_generated, record.date_generated);

        let json = serde_json::to_value(&summary).unwrap();
        assert!(json.get("scraped_content").is_none());
        assert!(json.get("full_quiz_data").is_none());
    }
}
