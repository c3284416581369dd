use thiserror::Error;

/// Error for quest data operations
#[derive(Debug, Clone, Error)]
pub enum QuestError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}
