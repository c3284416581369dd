use async_trait::async_trait;

use crate::account::models::AccountId;
use crate::quest::errors::QuestError;
use crate::quest::models::QuestPayload;
use crate::quest::models::QuestRecord;

/// Port for quest data service operations.
#[async_trait]
pub trait QuestServicePort: Send + Sync + 'static {
    /// Save the quest state of `account_id`, replacing any previous one.
    ///
    /// # Returns
    /// The stored record
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn save_quest_data(
        &self,
        account_id: &AccountId,
        payload: QuestPayload,
    ) -> Result<QuestRecord, QuestError>;

    /// Fetch the quest state of `account_id`.
    ///
    /// # Returns
    /// The saved payload, or None when the account never saved one
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn get_quest_data(&self, account_id: &AccountId)
        -> Result<Option<QuestPayload>, QuestError>;
}

/// Persistence operations for quest records.
#[async_trait]
pub trait QuestRepository: Send + Sync + 'static {
    /// Insert `record`, or overwrite payload and `updated_at` of the record
    /// already owned by the same account.
    ///
    /// # Returns
    /// The record as stored (keeps the original id and `created_at` on overwrite)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn upsert(&self, record: QuestRecord) -> Result<QuestRecord, QuestError>;

    /// Retrieve the record owned by `account_id`.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_account(
        &self,
        account_id: &AccountId,
    ) -> Result<Option<QuestRecord>, QuestError>;
}
