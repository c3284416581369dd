use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::quest::models::QuestPayload;
use crate::inbound::http::middleware::CurrentAccount;
use crate::inbound::http::router::AppState;

pub async fn get_quest_data(
    State(state): State<AppState>,
    Extension(CurrentAccount(account)): Extension<CurrentAccount>,
) -> Result<ApiSuccess<GetQuestDataResponseData>, ApiError> {
    state
        .quest_service
        .get_quest_data(&account.id)
        .await
        .map_err(ApiError::from)
        .map(|quest_data| ApiSuccess::new(StatusCode::OK, GetQuestDataResponseData { quest_data }))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GetQuestDataResponseData {
    pub quest_data: Option<QuestPayload>,
}
