use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::get_current_account::get_current_account;
use super::handlers::get_quest_data::get_quest_data;
use super::handlers::login::login;
use super::handlers::register::register;
use super::handlers::save_quest_data::save_quest_data;
use super::handlers::update_current_account::update_current_account;
use super::middleware::authenticate as auth_middleware;
use crate::domain::account::ports::AccountServicePort;
use crate::domain::quest::ports::QuestServicePort;

#[derive(Clone)]
pub struct AppState {
    pub account_service: Arc<dyn AccountServicePort>,
    pub quest_service: Arc<dyn QuestServicePort>,
}

pub fn create_router(
    account_service: Arc<dyn AccountServicePort>,
    quest_service: Arc<dyn QuestServicePort>,
) -> Router {
    let state = AppState {
        account_service,
        quest_service,
    };

    let public_routes = Router::new()
        .route("/api/register", post(register))
        .route("/api/login", post(login));

    let protected_routes = Router::new()
        .route(
            "/api/me",
            get(get_current_account).put(update_current_account),
        )
        .route("/api/quest-data", post(save_quest_data).get(get_quest_data))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(
            ServiceBuilder::new()
                .layer(trace_layer)
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use axum::http::header;
    use axum::http::StatusCode;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use super::*;
    use crate::account::errors::AccountError;
    use crate::account::models::Account;
    use crate::account::models::AccountId;
    use crate::account::models::AuthSession;
    use crate::account::models::EmailAddress;
    use crate::account::models::LoginCommand;
    use crate::account::models::RegisterAccountCommand;
    use crate::account::models::UpdateProfileCommand;
    use crate::account::models::Username;
    use crate::quest::errors::QuestError;
    use crate::quest::models::QuestPayload;
    use crate::quest::models::QuestRecord;

    const GOOD_TOKEN: &str = "good-token";

    fn hero() -> Account {
        let now = chrono::Utc::now();
        Account {
            id: AccountId::new(),
            email: EmailAddress::new("hero1@x.com".to_string()).unwrap(),
            username: Username::new("hero1".to_string()).unwrap(),
            password_hash: "hash".to_string(),
            display_name: "hero1".to_string(),
            profile_picture: None,
            created_at: now,
            updated_at: now,
            is_active: true,
        }
    }

    /// Accepts a single fixed token; only identity resolution is exercised.
    struct StubAccounts {
        lookup_fails: bool,
    }

    #[async_trait]
    impl AccountServicePort for StubAccounts {
        async fn register(&self, _: RegisterAccountCommand) -> Result<AuthSession, AccountError> {
            unimplemented!()
        }

        async fn login(&self, _: LoginCommand) -> Result<AuthSession, AccountError> {
            unimplemented!()
        }

        async fn resolve_identity(&self, token: &str) -> Result<Account, AccountError> {
            if self.lookup_fails {
                return Err(AccountError::DatabaseError("connection refused".to_string()));
            }
            if token == GOOD_TOKEN {
                Ok(hero())
            } else {
                Err(AccountError::Unauthenticated)
            }
        }

        async fn update_profile(
            &self,
            _: &Account,
            _: UpdateProfileCommand,
        ) -> Result<Account, AccountError> {
            unimplemented!()
        }
    }

    struct EmptyQuests;

    #[async_trait]
    impl QuestServicePort for EmptyQuests {
        async fn save_quest_data(
            &self,
            account_id: &AccountId,
            payload: QuestPayload,
        ) -> Result<QuestRecord, QuestError> {
            Ok(QuestRecord::new(*account_id, payload, chrono::Utc::now()))
        }

        async fn get_quest_data(&self, _: &AccountId) -> Result<Option<QuestPayload>, QuestError> {
            Ok(None)
        }
    }

    fn app(lookup_fails: bool) -> Router {
        create_router(
            Arc::new(StubAccounts { lookup_fails }),
            Arc::new(EmptyQuests),
        )
    }

    fn get_me(authorization: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri("/api/me");
        if let Some(value) = authorization {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn body_json(response: Response<Body>) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_protected_route_without_token() {
        let response = app(false).oneshot(get_me(None)).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            "Bearer"
        );
    }

    #[tokio::test]
    async fn test_protected_route_with_rejected_token() {
        let response = app(false)
            .oneshot(get_me(Some("Bearer forged")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = body_json(response).await;
        assert_eq!(body["detail"], "Could not validate credentials");
    }

    #[tokio::test]
    async fn test_protected_route_with_valid_token() {
        let response = app(false)
            .oneshot(get_me(Some(&format!("Bearer {GOOD_TOKEN}"))))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["username"], "hero1");
        assert!(body.get("password_hash").is_none());
    }

    #[tokio::test]
    async fn test_lookup_failure_is_internal_error() {
        let response = app(true)
            .oneshot(get_me(Some(&format!("Bearer {GOOD_TOKEN}"))))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["detail"], "Internal server error");
    }

    #[tokio::test]
    async fn test_quest_data_defaults_to_null() {
        let request = Request::builder()
            .uri("/api/quest-data")
            .header(header::AUTHORIZATION, format!("Bearer {GOOD_TOKEN}"))
            .body(Body::empty())
            .unwrap();

        let response = app(false).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert!(body["quest_data"].is_null());
        assert!(body.as_object().unwrap().contains_key("quest_data"));
    }
}
