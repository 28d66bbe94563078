use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;

use crate::domain::authentication::errors::AuthError;
use crate::domain::authentication::errors::SessionError;
use crate::domain::authentication::models::AuthenticatedUser;
use crate::domain::authentication::models::LoginCommand;
use crate::domain::authentication::models::RefreshSession;
use crate::domain::authentication::models::RefreshedAccess;
use crate::domain::authentication::models::TokenPair;
use crate::domain::user::models::CreateUserCommand;

/// Port for the authentication and session lifecycle.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new user and open a session for it.
    ///
    /// # Errors
    /// * `User(EmailAlreadyExists)` - Email is already registered
    /// * `User(UsernameAlreadyExists)` - Username is already taken
    /// * `Password` - Hashing failed
    /// * `Session` - Refresh token could not be registered
    async fn signup(&self, command: CreateUserCommand) -> Result<TokenPair, AuthError>;

    /// Verify credentials and open a session.
    ///
    /// # Errors
    /// * `UnknownAccount` - No user matches the identifier
    /// * `InvalidCredentials` - Password does not match
    async fn login(&self, command: LoginCommand) -> Result<TokenPair, AuthError>;

    /// Forget a refresh token. Unknown tokens are ignored.
    ///
    /// # Errors
    /// * `Session` - Session store failure
    async fn logout(&self, refresh_token: &str) -> Result<(), AuthError>;

    /// Exchange a registered refresh token for a new access token.
    ///
    /// # Errors
    /// * `UnregisteredRefreshToken` - Token is not in the registry
    /// * `InvalidToken` - Token is registered but expired, forged or of the wrong kind
    /// * `SubjectNotFound` - The token's user no longer exists
    async fn refresh(&self, refresh_token: &str) -> Result<RefreshedAccess, AuthError>;

    /// Verify an access token presented on a protected route.
    ///
    /// # Errors
    /// * `InvalidToken` - Token is expired, forged, of the wrong kind or has a bad subject
    fn authenticate(&self, access_token: &str) -> Result<AuthenticatedUser, AuthError>;
}

/// Tracks outstanding refresh tokens.
///
/// Entries past their `expires_at` count as absent.
#[async_trait]
pub trait SessionRegistry: Send + Sync + 'static {
    /// Register a refresh token. Re-adding a registered token is a no-op.
    async fn add(&self, session: RefreshSession) -> Result<(), SessionError>;

    /// Forget a refresh token, returning whether it was registered.
    async fn remove(&self, token: &str) -> Result<bool, SessionError>;

    /// Whether a live (registered, unexpired) entry exists for the token.
    async fn contains(&self, token: &str) -> Result<bool, SessionError>;

    /// Drop every entry that expired at or before `now`, returning how many.
    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<u64, SessionError>;
}
