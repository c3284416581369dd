use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::account::models::AccountId;
use crate::quest::errors::QuestError;
use crate::quest::models::QuestPayload;
use crate::quest::models::QuestRecord;
use crate::quest::models::QuestRecordId;
use crate::quest::ports::QuestRepository;

/// PostgreSQL implementation of QuestRepository.
///
/// Payloads live in a JSONB column; one row per account, enforced by
/// `quest_records_account_id_key`.
pub struct PostgresQuestRepository {
    pool: PgPool,
}

impl PostgresQuestRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct QuestRecordRow {
    id: Uuid,
    account_id: Uuid,
    payload: Json<QuestPayload>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<QuestRecordRow> for QuestRecord {
    fn from(r: QuestRecordRow) -> Self {
        QuestRecord {
            id: QuestRecordId(r.id),
            account_id: AccountId(r.account_id),
            payload: r.payload.0,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

#[async_trait]
impl QuestRepository for PostgresQuestRepository {
    async fn upsert(&self, record: QuestRecord) -> Result<QuestRecord, QuestError> {
        let row = sqlx::query_as::<_, QuestRecordRow>(
            r#"
            INSERT INTO quest_records (id, account_id, payload, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (account_id)
            DO UPDATE SET
                payload = EXCLUDED.payload,
                updated_at = EXCLUDED.updated_at
            RETURNING id, account_id, payload, created_at, updated_at
            "#,
        )
        .bind(record.id.0)
        .bind(record.account_id.0)
        .bind(Json(&record.payload))
        .bind(record.created_at)
        .bind(record.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| QuestError::DatabaseError(format!("Failed to upsert quest data: {}", e)))?;

        tracing::debug!("Quest data of account {} upserted", record.account_id);
        Ok(row.into())
    }

    async fn find_by_account(
        &self,
        account_id: &AccountId,
    ) -> Result<Option<QuestRecord>, QuestError> {
        let row = sqlx::query_as::<_, QuestRecordRow>(
            r#"
            SELECT id, account_id, payload, created_at, updated_at
            FROM quest_records
            WHERE account_id = $1
            "#,
        )
        .bind(account_id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| QuestError::DatabaseError(format!("Failed to get quest data: {}", e)))?;

        Ok(row.map(QuestRecord::from))
    }
}
