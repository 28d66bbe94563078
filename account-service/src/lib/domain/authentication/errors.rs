use auth::JwtError;
use thiserror::Error;

use crate::user::errors::UserError;

/// Error for session registry operations
#[derive(Debug, Clone, Error)]
pub enum SessionError {
    #[error("Session store error: {0}")]
    Storage(String),
}

/// Top-level error for signup, login, logout and refresh.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error(transparent)]
    User(#[from] UserError),

    #[error("Invalid email or username: {0}")]
    UnknownAccount(String),

    #[error("Incorrect password")]
    InvalidCredentials,

    #[error("Invalid refresh token")]
    UnregisteredRefreshToken,

    #[error("Invalid token: {0}")]
    InvalidToken(JwtError),

    #[error("User not found: {0}")]
    SubjectNotFound(String),

    #[error("Token issuance failed: {0}")]
    TokenIssuance(String),

    #[error("Password verification failed: {0}")]
    Password(#[from] auth::PasswordError),

    #[error(transparent)]
    Session(#[from] SessionError),
}
