pub mod quiz_handler;

pub use quiz_handler::{generate_quiz, get_history, get_quiz_by_id, health_check, root};
