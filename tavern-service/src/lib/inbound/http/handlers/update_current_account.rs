use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::AccountData;
use super::ApiError;
use super::ApiSuccess;
use crate::account::errors::AccountError;
use crate::domain::account::models::DisplayName;
use crate::domain::account::models::UpdateProfileCommand;
use crate::inbound::http::middleware::CurrentAccount;
use crate::inbound::http::router::AppState;

pub async fn update_current_account(
    State(state): State<AppState>,
    Extension(CurrentAccount(account)): Extension<CurrentAccount>,
    Json(body): Json<UpdateAccountRequest>,
) -> Result<ApiSuccess<AccountData>, ApiError> {
    let command = body.try_into_command()?;

    state
        .account_service
        .update_profile(&account, command)
        .await
        .map_err(ApiError::from)
        .map(|ref account| ApiSuccess::new(StatusCode::OK, account.into()))
}

/// Partial profile update; omitted fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UpdateAccountRequest {
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    profile_picture: Option<String>,
}

impl UpdateAccountRequest {
    fn try_into_command(self) -> Result<UpdateProfileCommand, AccountError> {
        let display_name = self.display_name.map(DisplayName::new).transpose()?;

        Ok(UpdateProfileCommand {
            display_name,
            profile_picture: self.profile_picture,
        })
    }
}
