use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::TokenIssuer;
use chrono::Utc;
use identity_service::config::PasswordConfig;
use identity_service::domain::session::service::AuthSessionService;
use identity_service::domain::user::models::NewUser;
use identity_service::domain::user::models::User;
use identity_service::domain::user::models::UserId;
use identity_service::domain::user::models::Username;
use identity_service::domain::user::ports::UserRepository;
use identity_service::domain::user::service::UserService;
use identity_service::inbound::http::router::create_router;
use identity_service::outbound::hasher::Argon2CredentialHasher;
use identity_service::user::errors::UserError;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns a real server over an in-memory store
pub struct TestApp {
    pub address: String,
    pub repository: Arc<InMemoryUserRepository>,
    pub api_client: reqwest::Client,
    pub issuer: TokenIssuer,
}

/// `UserRepository` kept in a map, with the same uniqueness rule as the
/// users table.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<HashMap<UserId, User>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, UserError> {
        let mut users = self.users.lock().unwrap();
        if users.values().any(|u| u.username == user.username) {
            return Err(UserError::UsernameAlreadyExists(
                user.username.as_str().to_string(),
            ));
        }

        let created = User {
            id: UserId::new(),
            username: user.username,
            name: user.name,
            password_hash: user.password_hash,
            created_at: Utc::now(),
        };
        users.insert(created.id, created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        Ok(self.users.lock().unwrap().get(id).cloned())
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .find(|u| &u.username == username)
            .cloned())
    }

    async fn update_password(&self, id: &UserId, password_hash: &str) -> Result<User, UserError> {
        let mut users = self.users.lock().unwrap();
        match users.get_mut(id) {
            Some(user) => {
                user.password_hash = password_hash.to_string();
                Ok(user.clone())
            }
            None => Err(UserError::NotFound(id.to_string())),
        }
    }
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let repository = Arc::new(InMemoryUserRepository::default());

        // Cheapest Argon2 cost, tests only
        let hasher = Arc::new(
            Argon2CredentialHasher::from_config(&PasswordConfig {
                memory_kib: 8,
                iterations: 1,
                parallelism: 1,
            })
            .expect("Failed to build hasher"),
        );

        let session_service = Arc::new(AuthSessionService::new(
            Arc::clone(&repository),
            Arc::clone(&hasher),
            Arc::new(TokenIssuer::new(TEST_SECRET)),
        ));
        let user_service = Arc::new(UserService::new(Arc::clone(&repository), hasher));

        let router = create_router(session_service, user_service);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            repository,
            api_client: reqwest::Client::new(),
            issuer: TokenIssuer::new(TEST_SECRET),
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

    /// Create a password account and return the response body
    pub async fn create_user(&self, username: &str, password: &str) -> reqwest::Response {
        self.post("/api/users")
            .json(&serde_json::json!({
                "username": username,
                "name": username,
                "password": password,
            }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Create a passwordless account and return its (access, refresh) tokens
    pub async fn create_passwordless_user(&self, username: &str) -> (String, String) {
        let response = self
            .post("/api/users/passwordless")
            .json(&serde_json::json!({
                "username": username,
                "name": username,
            }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        (
            body["data"]["token"].as_str().unwrap().to_string(),
            body["data"]["refresh"].as_str().unwrap().to_string(),
        )
    }

    /// Log in and return the raw response
    pub async fn login(&self, username: &str, password: &str) -> reqwest::Response {
        self.post("/api/auth/login")
            .json(&serde_json::json!({
                "username": username,
                "password": password,
            }))
            .send()
            .await
            .expect("Failed to execute request")
    }
}
