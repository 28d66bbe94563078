use std::sync::Arc;

use async_trait::async_trait;
use auth::JwtError;
use auth::PasswordHasher;
use auth::TokenIssuer;

use crate::domain::authentication::errors::AuthError;
use crate::domain::authentication::models::AuthenticatedUser;
use crate::domain::authentication::models::LoginCommand;
use crate::domain::authentication::models::LoginIdentifier;
use crate::domain::authentication::models::RefreshSession;
use crate::domain::authentication::models::RefreshedAccess;
use crate::domain::authentication::models::TokenPair;
use crate::domain::authentication::ports::AuthServicePort;
use crate::domain::authentication::ports::SessionRegistry;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;

/// Orchestrates signup, login, logout and refresh over the credential
/// store, the token issuer and the session registry.
pub struct AuthService<UR, SR>
where
    UR: UserRepository,
    SR: SessionRegistry,
{
    repository: Arc<UR>,
    sessions: Arc<SR>,
    token_issuer: Arc<TokenIssuer>,
    password_hasher: PasswordHasher,
    rotate_refresh_tokens: bool,
}

impl<UR, SR> AuthService<UR, SR>
where
    UR: UserRepository,
    SR: SessionRegistry,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// Refresh tokens are not rotated unless `with_refresh_rotation(true)` is set.
    pub fn new(
        repository: Arc<UR>,
        sessions: Arc<SR>,
        token_issuer: Arc<TokenIssuer>,
        password_hasher: PasswordHasher,
    ) -> Self {
        Self {
            repository,
            sessions,
            token_issuer,
            password_hasher,
            rotate_refresh_tokens: false,
        }
    }

    /// Replace the presented refresh token with a new one on every refresh.
    pub fn with_refresh_rotation(mut self, enabled: bool) -> Self {
        self.rotate_refresh_tokens = enabled;
        self
    }

    async fn open_session(&self, user: &User) -> Result<TokenPair, AuthError> {
        let access = self
            .token_issuer
            .issue_access(user.id, user.role)
            .map_err(|e| AuthError::TokenIssuance(e.to_string()))?;
        let refresh_token = self.register_refresh_token(user).await?;

        Ok(TokenPair {
            access_token: access.token.clone(),
            expires_at: access.expires_at(),
            refresh_token,
        })
    }

    async fn register_refresh_token(&self, user: &User) -> Result<String, AuthError> {
        let refresh = self
            .token_issuer
            .issue_refresh(user.id)
            .map_err(|e| AuthError::TokenIssuance(e.to_string()))?;

        self.sessions
            .add(RefreshSession {
                token: refresh.token.clone(),
                user_id: user.id,
                expires_at: refresh.expires_at(),
            })
            .await?;

        Ok(refresh.token)
    }
}

#[async_trait]
impl<UR, SR> AuthServicePort for AuthService<UR, SR>
where
    UR: UserRepository,
    SR: SessionRegistry,
{
    async fn signup(&self, command: CreateUserCommand) -> Result<TokenPair, AuthError> {
        if self.repository.find_by_email(&command.email).await?.is_some() {
            return Err(UserError::EmailAlreadyExists(command.email.to_string()).into());
        }

        let password_hash = self.password_hasher.hash(command.password.expose())?;
        let created_user = self
            .repository
            .create(User::register(command, password_hash))
            .await?;

        tracing::info!(
            user_id = %created_user.id,
            username = %created_user.username,
            "User signed up"
        );

        self.open_session(&created_user).await
    }

    async fn login(&self, command: LoginCommand) -> Result<TokenPair, AuthError> {
        let user = match &command.identifier {
            LoginIdentifier::Username(username) => {
                self.repository.find_by_username(username).await?
            }
            LoginIdentifier::Email(email) => self.repository.find_by_email(email).await?,
        }
        .ok_or_else(|| AuthError::UnknownAccount(command.identifier.to_string()))?;

        if !self
            .password_hasher
            .verify(&command.password, &user.password_hash)?
        {
            tracing::warn!(user_id = %user.id, "Login rejected: incorrect password");
            return Err(AuthError::InvalidCredentials);
        }

        tracing::info!(user_id = %user.id, "User logged in");
        self.open_session(&user).await
    }

    async fn logout(&self, refresh_token: &str) -> Result<(), AuthError> {
        let removed = self.sessions.remove(refresh_token).await?;
        tracing::debug!(removed, "Refresh token released");

        Ok(())
    }

    async fn refresh(&self, refresh_token: &str) -> Result<RefreshedAccess, AuthError> {
        if !self.sessions.contains(refresh_token).await? {
            return Err(AuthError::UnregisteredRefreshToken);
        }

        let claims = match self.token_issuer.verify_refresh(refresh_token) {
            Ok(claims) => claims,
            Err(JwtError::TokenExpired) => {
                self.sessions.remove(refresh_token).await?;
                return Err(AuthError::InvalidToken(JwtError::TokenExpired));
            }
            Err(e) => return Err(AuthError::InvalidToken(e)),
        };

        let user_id = UserId::from_string(&claims.sub)
            .map_err(|e| AuthError::InvalidToken(JwtError::InvalidToken(e.to_string())))?;
        let user = self
            .repository
            .find_by_id(&user_id)
            .await?
            .ok_or_else(|| AuthError::SubjectNotFound(user_id.to_string()))?;

        // Removal is the single-use gate: only one concurrent refresh can win it
        if self.rotate_refresh_tokens && !self.sessions.remove(refresh_token).await? {
            return Err(AuthError::UnregisteredRefreshToken);
        }

        let access = self
            .token_issuer
            .issue_access(user.id, user.role)
            .map_err(|e| AuthError::TokenIssuance(e.to_string()))?;

        let rotated = if self.rotate_refresh_tokens {
            Some(self.register_refresh_token(&user).await?)
        } else {
            None
        };

        tracing::debug!(user_id = %user.id, rotated = rotated.is_some(), "Access token refreshed");

        Ok(RefreshedAccess {
            access_token: access.token.clone(),
            expires_at: access.expires_at(),
            refresh_token: rotated,
        })
    }

    fn authenticate(&self, access_token: &str) -> Result<AuthenticatedUser, AuthError> {
        let claims = self
            .token_issuer
            .verify_access(access_token)
            .map_err(AuthError::InvalidToken)?;

        let user_id = UserId::from_string(&claims.sub)
            .map_err(|e| AuthError::InvalidToken(JwtError::InvalidToken(e.to_string())))?;
        let role = claims
            .role
            .ok_or_else(|| AuthError::InvalidToken(JwtError::MissingClaim("role".to_string())))?;

        Ok(AuthenticatedUser { user_id, role })
    }
}
