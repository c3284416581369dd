use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::account::models::AccountId;
use crate::quest::errors::QuestError;
use crate::quest::models::QuestPayload;
use crate::quest::models::QuestRecord;
use crate::quest::ports::QuestRepository;
use crate::quest::ports::QuestServicePort;

/// Domain service implementation for quest data.
pub struct QuestService<QR>
where
    QR: QuestRepository,
{
    repository: Arc<QR>,
}

impl<QR> QuestService<QR>
where
    QR: QuestRepository,
{
    pub fn new(repository: Arc<QR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<QR> QuestServicePort for QuestService<QR>
where
    QR: QuestRepository,
{
    async fn save_quest_data(
        &self,
        account_id: &AccountId,
        payload: QuestPayload,
    ) -> Result<QuestRecord, QuestError> {
        let record = QuestRecord::new(*account_id, payload, Utc::now());
        let stored = self.repository.upsert(record).await?;

        tracing::debug!(
            account_id = %account_id,
            record_id = %stored.id,
            "Quest data saved"
        );

        Ok(stored)
    }

    async fn get_quest_data(
        &self,
        account_id: &AccountId,
    ) -> Result<Option<QuestPayload>, QuestError> {
        Ok(self
            .repository
            .find_by_account(account_id)
            .await?
            .map(|record| record.payload))
    }
}
