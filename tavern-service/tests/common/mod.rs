use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::Authenticator;
use auth::JwtHandler;
use chrono::DateTime;
use chrono::Utc;
use serde_json::json;
use serde_json::Value;
use tavern_service::account::errors::AccountError;
use tavern_service::account::models::Account;
use tavern_service::account::models::AccountId;
use tavern_service::account::models::UpdateProfileCommand;
use tavern_service::account::models::Username;
use tavern_service::account::ports::AccountRepository;
use tavern_service::domain::account::service::AccountService;
use tavern_service::domain::quest::service::QuestService;
use tavern_service::inbound::http::router::create_router;
use tavern_service::quest::errors::QuestError;
use tavern_service::quest::models::QuestRecord;
use tavern_service::quest::ports::QuestRepository;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns a real server over in-memory storage
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub jwt_handler: JwtHandler,
    pub quests: Arc<InMemoryQuestRepository>,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let address = format!("http://{}", listener.local_addr().unwrap());

        let accounts = Arc::new(InMemoryAccountRepository::default());
        let quests = Arc::new(InMemoryQuestRepository::default());
        let authenticator = Arc::new(Authenticator::new(JWT_SECRET));

        let account_service = Arc::new(AccountService::new(accounts, authenticator));
        let quest_service = Arc::new(QuestService::new(Arc::clone(&quests)));

        let router = create_router(account_service, quest_service);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            jwt_handler: JwtHandler::new(JWT_SECRET),
            quests,
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Helper to make PUT request with Bearer token
    pub fn put_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .put(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Register an account and return the response body.
    pub async fn register(&self, email: &str, username: &str, password: &str) -> Value {
        let response = self
            .post("/api/register")
            .json(&json!({
                "email": email,
                "username": username,
                "password": password,
            }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), reqwest::StatusCode::OK);
        response.json().await.expect("Failed to parse response")
    }

    /// Register an account and return its access token.
    pub async fn register_token(&self, email: &str, username: &str) -> String {
        let body = self.register(email, username, "Passw0rd").await;
        body["access_token"]
            .as_str()
            .expect("Missing access token")
            .to_string()
    }
}

/// Account directory kept in a map; enforces email and username uniqueness
/// the way the database constraints do.
#[derive(Default)]
pub struct InMemoryAccountRepository {
    accounts: Mutex<HashMap<AccountId, Account>>,
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn create(&self, account: Account) -> Result<Account, AccountError> {
        let mut accounts = self.accounts.lock().unwrap();

        if accounts.values().any(|a| a.email == account.email) {
            return Err(AccountError::EmailAlreadyExists(
                account.email.as_str().to_string(),
            ));
        }
        if accounts.values().any(|a| a.username == account.username) {
            return Err(AccountError::UsernameAlreadyExists(
                account.username.as_str().to_string(),
            ));
        }

        accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountError> {
        Ok(self.accounts.lock().unwrap().get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountError> {
        Ok(self
            .accounts
            .lock()
            .unwrap()
            .values()
            .find(|a| a.email.as_str() == email)
            .cloned())
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<Account>, AccountError> {
        Ok(self
            .accounts
            .lock()
            .unwrap()
            .values()
            .find(|a| &a.username == username)
            .cloned())
    }

    async fn update_profile(
        &self,
        id: &AccountId,
        changes: &UpdateProfileCommand,
        updated_at: DateTime<Utc>,
    ) -> Result<Account, AccountError> {
        let mut accounts = self.accounts.lock().unwrap();
        let account = accounts
            .get_mut(id)
            .ok_or_else(|| AccountError::NotFound(id.to_string()))?;

        if let Some(display_name) = &changes.display_name {
            account.display_name = display_name.as_str().to_string();
        }
        if let Some(profile_picture) = &changes.profile_picture {
            account.profile_picture = Some(profile_picture.clone());
        }
        account.updated_at = updated_at;

        Ok(account.clone())
    }
}

/// Quest records keyed by owner, one per account.
#[derive(Default)]
pub struct InMemoryQuestRepository {
    records: Mutex<HashMap<AccountId, QuestRecord>>,
}

impl InMemoryQuestRepository {
    pub fn record_count(&self) -> usize {
        self.records.lock().unwrap().len()
    }
}

#[async_trait]
impl QuestRepository for InMemoryQuestRepository {
    async fn upsert(&self, record: QuestRecord) -> Result<QuestRecord, QuestError> {
        let mut records = self.records.lock().unwrap();

        let stored = match records.get(&record.account_id) {
            Some(existing) => QuestRecord {
                id: existing.id,
                created_at: existing.created_at,
                ..record
            },
            None => record,
        };

        records.insert(stored.account_id, stored.clone());
        Ok(stored)
    }

    async fn find_by_account(
        &self,
        account_id: &AccountId,
    ) -> Result<Option<QuestRecord>, QuestError> {
        Ok(self.records.lock().unwrap().get(account_id).cloned())
    }
}
