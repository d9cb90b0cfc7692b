use async_trait::async_trait;
use chrono::Utc;
use futures::TryStreamExt;
use mongodb::{
    bson::doc,
    options::{FindOneAndUpdateOptions, FindOptions, IndexOptions, ReturnDocument},
    Collection, IndexModel,
};
use serde::{Deserialize, Serialize};

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::domain::{NewQuizRecord, QuizRecord, QuizRecordSummary},
};

/// Append-only store of generated quizzes. Records are created and read,
/// never updated.
#[async_trait]
pub trait QuizRecordRepository: Send + Sync {
    async fn insert(&self, record: NewQuizRecord) -> AppResult<i64>;
    async fn list_all(&self) -> AppResult<Vec<QuizRecordSummary>>;
    async fn find_by_id(&self, id: i64) -> AppResult<Option<QuizRecord>>;
}

#[derive(Debug, Deserialize, Serialize)]
struct CounterDoc {
    #[serde(rename = "_id")]
    id: String,
    seq: i64,
}

const RECORDS_COLLECTION: &str = "quizzes";
const COUNTERS_COLLECTION: &str = "counters";
const RECORDS_COUNTER_ID: &str = "quizzes";

pub struct MongoQuizRecordRepository {
    records: Collection<QuizRecord>,
    counters: Collection<CounterDoc>,
}

impl MongoQuizRecordRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            records: db.get_collection(RECORDS_COLLECTION),
            counters: db.get_collection(COUNTERS_COLLECTION),
        }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for quizzes collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();
        self.records.create_index(id_index).await?;

        let date_index = IndexModel::builder()
            .keys(doc! { "date_generated": -1 })
            .build();
        self.records.create_index(date_index).await?;

        Ok(())
    }

    /// Atomically reserves the next record id from the counters collection.
    async fn next_id(&self) -> AppResult<i64> {
        let options = FindOneAndUpdateOptions::builder()
            .upsert(true)
            .return_document(ReturnDocument::After)
            .build();

        let counter = self
            .counters
            .find_one_and_update(
                doc! { "_id": RECORDS_COUNTER_ID },
                doc! { "$inc": { "seq": 1 } },
            )
            .with_options(options)
            .await?
            .ok_or_else(|| {
                AppError::DatabaseError("Counter document missing after upsert".to_string())
            })?;

        Ok(counter.seq)
    }
}

#[async_trait]
impl QuizRecordRepository for MongoQuizRecordRepository {
    async fn insert(&self, record: NewQuizRecord) -> AppResult<i64> {
        let id = self.next_id().await?;
        let record = QuizRecord {
            id,
            url: record.url,
            title: record.title,
            date_generated: Utc::now(),
            scraped_content: record.scraped_content,
            full_quiz_data: record.full_quiz_data,
        };

        // Single-document insert, atomic by the engine's own semantics.
        self.records.insert_one(&record).await?;
        Ok(id)
    }

    async fn list_all(&self) -> AppResult<Vec<QuizRecordSummary>> {
        let find_options = FindOptions::builder()
            .sort(doc! { "date_generated": -1, "id": -1 })
            .projection(doc! { "id": 1, "url": 1, "title": 1, "date_generated": 1, "_id": 0 })
            .build();

        let cursor = self
            .records
            .clone_with_type::<QuizRecordSummary>()
            .find(doc! {})
            .with_options(find_options)
            .await?;
        let items: Vec<QuizRecordSummary> = cursor.try_collect().await?;

        Ok(items)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<QuizRecord>> {
        let record = self.records.find_one(doc! { "id": id }).await?;
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MongoQuizRecordRepository>();
    }

    #[test]
    fn test_counter_doc_serialization() {
        let counter = CounterDoc {
            id: RECORDS_COUNTER_ID.to_string(),
            seq: 41,
        };
        let json = serde_json::to_value(&counter).unwrap();
        assert_eq!(json["_id"], "quizzes");
        assert_eq!(json["seq"], 41);
    }
}
