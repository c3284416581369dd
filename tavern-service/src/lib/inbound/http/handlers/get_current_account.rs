use axum::http::StatusCode;
use axum::Extension;

use super::AccountData;
use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::middleware::CurrentAccount;

pub async fn get_current_account(
    Extension(CurrentAccount(account)): Extension<CurrentAccount>,
) -> Result<ApiSuccess<AccountData>, ApiError> {
    Ok(ApiSuccess::new(StatusCode::OK, (&account).into()))
}
