use axum::http::header;
use axum::http::HeaderValue;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use crate::account::errors::AccountError;
use crate::account::models::Account;
use crate::account::models::AuthSession;
use crate::quest::errors::QuestError;

pub mod get_current_account;
pub mod get_quest_data;
pub mod login;
pub mod register;
pub mod save_quest_data;
pub mod update_current_account;

/// Successful response: status plus the bare JSON body.
#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<T>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(data))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    UnprocessableEntity(String),
    NotFound(String),
    Conflict(String),
    Unauthorized(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            ApiError::InternalServerError(msg) => {
                tracing::error!(error = %msg, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            ApiError::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
        };

        let mut response = (status, Json(ApiErrorBody { detail })).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}

impl From<AccountError> for ApiError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::NotFound(_) => ApiError::NotFound(err.to_string()),
            AccountError::UsernameAlreadyExists(ref username) => {
                tracing::debug!(%username, "Username conflict");
                ApiError::Conflict(err.to_string())
            }
            AccountError::EmailAlreadyExists(ref email) => {
                tracing::debug!(%email, "Email conflict");
                ApiError::Conflict(err.to_string())
            }
            AccountError::InvalidCredentials | AccountError::Unauthenticated => {
                ApiError::Unauthorized(err.to_string())
            }
            AccountError::InvalidUsername(_)
            | AccountError::InvalidEmail(_)
            | AccountError::InvalidPassword(_)
            | AccountError::InvalidDisplayName(_) => ApiError::UnprocessableEntity(err.to_string()),
            AccountError::PasswordHashing(_)
            | AccountError::Token(_)
            | AccountError::DatabaseError(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

impl From<QuestError> for ApiError {
    fn from(err: QuestError) -> Self {
        match err {
            QuestError::DatabaseError(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

/// Error body: a single human-readable `detail`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorBody {
    pub detail: String,
}

/// Public view of an account; never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountData {
    pub id: String,
    pub email: String,
    pub username: String,
    pub display_name: String,
    pub profile_picture: Option<String>,
    pub created_at: DateTime<Utc>,
    pub is_active: bool,
}

impl From<&Account> for AccountData {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id.to_string(),
            email: account.email.as_str().to_string(),
            username: account.username.as_str().to_string(),
            display_name: account.display_name.clone(),
            profile_picture: account.profile_picture.clone(),
            created_at: account.created_at,
            is_active: account.is_active,
        }
    }
}

/// Body returned by register and login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenResponseData {
    pub access_token: String,
    pub token_type: &'static str,
    pub user: AccountData,
}

impl From<&AuthSession> for TokenResponseData {
    fn from(session: &AuthSession) -> Self {
        Self {
            access_token: session.access_token.clone(),
            token_type: "bearer",
            user: (&session.account).into(),
        }
    }
}
