use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::quest::models::QuestPayload;
use crate::inbound::http::middleware::CurrentAccount;
use crate::inbound::http::router::AppState;

pub async fn save_quest_data(
    State(state): State<AppState>,
    Extension(CurrentAccount(account)): Extension<CurrentAccount>,
    Json(body): Json<SaveQuestDataRequest>,
) -> Result<ApiSuccess<SaveQuestDataResponseData>, ApiError> {
    state
        .quest_service
        .save_quest_data(&account.id, body.quest_data)
        .await
        .map_err(ApiError::from)
        .map(|_| {
            ApiSuccess::new(
                StatusCode::OK,
                SaveQuestDataResponseData {
                    message: "Quest data saved successfully".to_string(),
                },
            )
        })
}

/// The payload must be a JSON object; anything else is rejected by the extractor.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SaveQuestDataRequest {
    quest_data: QuestPayload,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SaveQuestDataResponseData {
    pub message: String,
}
