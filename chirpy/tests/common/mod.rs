use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use auth::Authenticator;
use auth::JwtHandler;
use chrono::DateTime;
use chrono::Utc;
use chirpy::domain::chirp::errors::ChirpError;
use chirpy::domain::chirp::models::Chirp;
use chirpy::domain::chirp::models::ChirpId;
use chirpy::domain::chirp::models::ChirpOrder;
use chirpy::domain::chirp::models::ChirpQuery;
use chirpy::domain::chirp::ports::ChirpRepository;
use chirpy::domain::chirp::service::ChirpService;
use chirpy::domain::session::errors::AuthError;
use chirpy::domain::session::models::RefreshToken;
use chirpy::domain::session::models::SessionSettings;
use chirpy::domain::session::ports::RefreshTokenRepository;
use chirpy::domain::session::service::AuthService;
use chirpy::domain::user::models::User;
use chirpy::domain::user::models::UserId;
use chirpy::domain::user::ports::UserRepository;
use chirpy::domain::user::service::UserService;
use chirpy::inbound::http::router::create_router;
use chirpy::user::errors::UserError;
use serde_json::json;
use serde_json::Value;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns a real server over in-memory storage
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub api_client: reqwest::Client,
    pub jwt_handler: JwtHandler,
    pub users: Arc<InMemoryUserRepository>,
    pub refresh_tokens: Arc<InMemoryRefreshTokenRepository>,
    pub chirps: Arc<InMemoryChirpRepository>,
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

        let users = Arc::new(InMemoryUserRepository::default());
        let refresh_tokens = Arc::new(InMemoryRefreshTokenRepository::default());
        let chirps = Arc::new(InMemoryChirpRepository::default());

        let user_service = Arc::new(UserService::new(Arc::clone(&users)));
        let auth_service = Arc::new(AuthService::new(
            Arc::clone(&users),
            Arc::clone(&refresh_tokens),
            Arc::new(Authenticator::new(JWT_SECRET)),
            SessionSettings::default(),
        ));

        let chirp_service = Arc::new(ChirpService::new(Arc::clone(&chirps)));

        let router = create_router(
            user_service,
            auth_service,
            chirp_service,
            concat!(env!("CARGO_MANIFEST_DIR"), "/static"),
            Duration::from_secs(10),
        );

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            port,
            api_client: reqwest::Client::new(),
            jwt_handler: JwtHandler::new(JWT_SECRET),
            users,
            refresh_tokens,
            chirps,
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

    /// Helper to make DELETE request with Bearer token
    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .delete(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Create a user and return the response body
    pub async fn create_user(&self, email: &str, password: &str) -> Value {
        let response = self
            .post("/api/users")
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), reqwest::StatusCode::CREATED);
        response.json().await.expect("Failed to parse response")
    }

    /// Log in and return the response body
    pub async fn login(&self, email: &str, password: &str) -> Value {
        let response = self
            .post("/api/login")
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), reqwest::StatusCode::OK);
        response.json().await.expect("Failed to parse response")
    }

    /// Post a chirp as the holder of `token` and return the response body
    pub async fn create_chirp(&self, token: &str, body: &str) -> Value {
        let response = self
            .post_authenticated("/api/chirps", token)
            .json(&json!({ "body": body }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), reqwest::StatusCode::CREATED);
        response.json().await.expect("Failed to parse response")
    }
}

/// `UserRepository` over a map, with the same uniqueness rules as the users table
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<HashMap<UserId, User>>,
}

impl InMemoryUserRepository {
    pub fn email_of(&self, id: &str) -> Option<String> {
        let id = UserId::from_string(id).ok()?;
        self.users
            .lock()
            .unwrap()
            .get(&id)
            .map(|u| u.email.as_str().to_string())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.lock().unwrap();

        if users.values().any(|u| u.email == user.email) {
            return Err(UserError::EmailAlreadyExists(user.email.to_string()));
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        Ok(self.users.lock().unwrap().get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .find(|u| u.email.as_str() == email)
            .cloned())
    }

    async fn update(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.lock().unwrap();

        if users
            .values()
            .any(|u| u.id != user.id && u.email == user.email)
        {
            return Err(UserError::EmailAlreadyExists(user.email.to_string()));
        }

        match users.get_mut(&user.id) {
            Some(existing) => {
                *existing = user.clone();
                Ok(user)
            }
            None => Err(UserError::NotFound(user.id.to_string())),
        }
    }
}

/// `RefreshTokenRepository` over a map, revoking the way the SQL adapter does
#[derive(Default)]
pub struct InMemoryRefreshTokenRepository {
    tokens: Mutex<HashMap<String, RefreshToken>>,
}

impl InMemoryRefreshTokenRepository {
    /// Insert a record directly, bypassing login
    pub fn seed(&self, token: RefreshToken) {
        self.tokens
            .lock()
            .unwrap()
            .insert(token.token.clone(), token);
    }

    pub fn get(&self, token: &str) -> Option<RefreshToken> {
        self.tokens.lock().unwrap().get(token).cloned()
    }
}

#[async_trait]
impl RefreshTokenRepository for InMemoryRefreshTokenRepository {
    async fn create(&self, token: RefreshToken) -> Result<RefreshToken, AuthError> {
        let mut tokens = self.tokens.lock().unwrap();

        if tokens.contains_key(&token.token) {
            return Err(AuthError::PersistenceFailure(
                "duplicate refresh token".to_string(),
            ));
        }

        tokens.insert(token.token.clone(), token.clone());
        Ok(token)
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<RefreshToken>, AuthError> {
        Ok(self.get(token))
    }

    async fn revoke(&self, token: &str, revoked_at: DateTime<Utc>) -> Result<(), AuthError> {
        let mut tokens = self.tokens.lock().unwrap();
        let record = tokens.get_mut(token).ok_or(AuthError::TokenNotFound)?;

        record.revoked_at = record.revoked_at.or(Some(revoked_at));
        record.updated_at = revoked_at;
        Ok(())
    }
}

/// `ChirpRepository` over a vector, ordered like the SQL adapter
#[derive(Default)]
pub struct InMemoryChirpRepository {
    chirps: Mutex<Vec<Chirp>>,
}

#[async_trait]
impl ChirpRepository for InMemoryChirpRepository {
    async fn create(&self, chirp: Chirp) -> Result<Chirp, ChirpError> {
        self.chirps.lock().unwrap().push(chirp.clone());
        Ok(chirp)
    }

    async fn find_by_id(&self, id: &ChirpId) -> Result<Option<Chirp>, ChirpError> {
        Ok(self
            .chirps
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == *id)
            .cloned())
    }

    async fn list(&self, query: ChirpQuery) -> Result<Vec<Chirp>, ChirpError> {
        let mut chirps: Vec<Chirp> = self
            .chirps
            .lock()
            .unwrap()
            .iter()
            .filter(|c| query.author_id.map_or(true, |author| c.user_id == author))
            .cloned()
            .collect();

        // Insertion order breaks ties between equal timestamps.
        chirps.sort_by_key(|c| c.created_at);
        if query.order == ChirpOrder::NewestFirst {
            chirps.reverse();
        }

        Ok(chirps)
    }

    async fn delete(&self, id: &ChirpId) -> Result<(), ChirpError> {
        let mut chirps = self.chirps.lock().unwrap();
        let before = chirps.len();
        chirps.retain(|c| c.id != *id);

        if chirps.len() == before {
            return Err(ChirpError::NotFound(id.to_string()));
        }
        Ok(())
    }
}
