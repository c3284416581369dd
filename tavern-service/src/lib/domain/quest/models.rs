use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use serde_json::Map;
use serde_json::Value;
use uuid::Uuid;

use crate::account::models::AccountId;

/// Opaque quest state saved by the client: any JSON object.
pub type QuestPayload = Map<String, Value>;

/// Quest record entity.
///
/// At most one exists per account; saving again overwrites it in place.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestRecord {
    pub id: QuestRecordId,
    pub account_id: AccountId,
    pub payload: QuestPayload,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl QuestRecord {
    /// Build a fresh record for `account_id`, stamped with `now`.
    pub fn new(account_id: AccountId, payload: QuestPayload, now: DateTime<Utc>) -> Self {
        Self {
            id: QuestRecordId::new(),
            account_id,
            payload,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Quest record unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QuestRecordId(pub Uuid);

impl QuestRecordId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for QuestRecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for QuestRecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
