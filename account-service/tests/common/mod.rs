#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use account_service::domain::authentication::service::AuthService;
use account_service::domain::user::models::EmailAddress;
use account_service::domain::user::models::Pagination;
use account_service::domain::user::models::Role;
use account_service::domain::user::models::User;
use account_service::domain::user::models::UserId;
use account_service::domain::user::models::Username;
use account_service::domain::user::ports::UserRepository;
use account_service::domain::user::service::UserService;
use account_service::inbound::http::router::create_router;
use account_service::outbound::sessions::InMemorySessionRegistry;
use account_service::user::errors::UserError;
use async_trait::async_trait;
use auth::PasswordHasher;
use auth::TokenIssuer;
use serde_json::json;
use serde_json::Value;
use tokio::sync::RwLock;

pub mod db;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Credential store kept in memory, enforcing the same uniqueness rules as
/// the `users` table constraints.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<UserId, User>>,
}

impl InMemoryUserRepository {
    pub async fn count(&self) -> usize {
        self.users.read().await.len()
    }

    fn check_unique(users: &HashMap<UserId, User>, candidate: &User) -> Result<(), UserError> {
        for user in users.values().filter(|u| u.id != candidate.id) {
            if user.username == candidate.username {
                return Err(UserError::UsernameAlreadyExists(
                    candidate.username.as_str().to_string(),
                ));
            }
            if user.email == candidate.email {
                return Err(UserError::EmailAlreadyExists(
                    candidate.email.as_str().to_string(),
                ));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.write().await;
        Self::check_unique(&users, &user)?;
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| &u.username == username)
            .cloned())
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| &u.email == email)
            .cloned())
    }

    async fn list(&self, pagination: Pagination) -> Result<Vec<User>, UserError> {
        let mut users: Vec<User> = self.users.read().await.values().cloned().collect();
        users.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.id.0.cmp(&b.id.0))
        });

        let window = users.into_iter().skip(pagination.offset as usize);
        Ok(match pagination.limit {
            Some(limit) => window.take(limit as usize).collect(),
            None => window.collect(),
        })
    }

    async fn update(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.write().await;
        if !users.contains_key(&user.id) {
            return Err(UserError::NotFound(user.id.to_string()));
        }
        Self::check_unique(&users, &user)?;
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn delete(&self, id: &UserId) -> Result<(), UserError> {
        self.users
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| UserError::NotFound(id.to_string()))
    }
}

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub users: Arc<InMemoryUserRepository>,
    pub sessions: Arc<InMemorySessionRegistry>,
    pub token_issuer: Arc<TokenIssuer>,
}

/// Tokens returned by signup and login
#[derive(Debug, Clone)]
pub struct Tokens {
    pub access_token: String,
    pub refresh_token: String,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        Self::spawn_with_rotation(false).await
    }

    pub async fn spawn_with_rotation(rotate_refresh_tokens: bool) -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let users = Arc::new(InMemoryUserRepository::default());
        let sessions = Arc::new(InMemorySessionRegistry::new());
        let token_issuer = Arc::new(TokenIssuer::new(JWT_SECRET));
        // Cheap work factor keeps the suite fast
        let password_hasher = PasswordHasher::with_work_factor(1024, 1, 1).unwrap();

        let auth_service = Arc::new(
            AuthService::new(
                Arc::clone(&users),
                Arc::clone(&sessions),
                Arc::clone(&token_issuer),
                password_hasher.clone(),
            )
            .with_refresh_rotation(rotate_refresh_tokens),
        );
        let user_service = Arc::new(UserService::new(Arc::clone(&users), password_hasher));

        let router = create_router(auth_service, user_service);

        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            users,
            sessions,
            token_issuer,
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

    /// Helper to make PATCH request
    pub fn patch(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.patch(format!("{}{}", self.address, path))
    }

    /// Helper to make DELETE request
    pub fn delete(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.delete(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Helper to make PATCH request with Bearer token
    pub fn patch_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.patch(path).bearer_auth(token)
    }

    /// Helper to make DELETE request with Bearer token
    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.delete(path).bearer_auth(token)
    }

    /// Sign up `username` with `<username>@example.com` and the given password.
    pub async fn signup(&self, username: &str, password: &str) -> Tokens {
        let response = self
            .post("/signup")
            .json(&json!({
                "displayName": username,
                "email": format!("{}@example.com", username),
                "username": username,
                "password": password,
            }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        Self::tokens(response.json().await.expect("Failed to parse response"))
    }

    pub async fn login(&self, username: &str, password: &str) -> Tokens {
        let response = self
            .post("/login")
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        Self::tokens(response.json().await.expect("Failed to parse response"))
    }

    /// Sign up a user, promote it to admin in the store and log in again so
    /// the access token carries the new role.
    pub async fn admin(&self, username: &str) -> Tokens {
        self.signup(username, "admin-password").await;
        self.set_role(username, Role::Admin).await;
        self.login(username, "admin-password").await
    }

    pub async fn set_role(&self, username: &str, role: Role) {
        let mut user = self.user(username).await;
        user.role = role;
        self.users.update(user).await.unwrap();
    }

    pub async fn user(&self, username: &str) -> User {
        self.users
            .find_by_username(&Username::new(username.to_string()).unwrap())
            .await
            .unwrap()
            .expect("user exists")
    }

    fn tokens(body: Value) -> Tokens {
        Tokens {
            access_token: body["accessToken"].as_str().unwrap().to_string(),
            refresh_token: body["refreshToken"].as_str().unwrap().to_string(),
        }
    }
}
