pub mod quiz;
pub mod quiz_record;

pub use quiz::{KeyEntity, Question, Quiz};
pub use quiz_record::{NewQuizRecord, QuizRecord, QuizRecordSummary};
