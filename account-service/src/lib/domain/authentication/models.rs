use std::fmt;

use chrono::DateTime;
use chrono::Utc;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Role;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;

/// How a user identifies themselves at login. Username wins when both are given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginIdentifier {
    Username(Username),
    Email(EmailAddress),
}

impl fmt::Display for LoginIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoginIdentifier::Username(username) => write!(f, "username {}", username),
            LoginIdentifier::Email(email) => write!(f, "email {}", email),
        }
    }
}

/// Command to exchange credentials for a token pair.
#[derive(Debug)]
pub struct LoginCommand {
    pub identifier: LoginIdentifier,
    pub password: String,
}

/// Tokens handed out on signup and login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub expires_at: DateTime<Utc>,
    pub refresh_token: String,
}

/// Result of a refresh: a new access token and, when rotation is enabled,
/// the refresh token that replaces the presented one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshedAccess {
    pub access_token: String,
    pub expires_at: DateTime<Utc>,
    pub refresh_token: Option<String>,
}

/// A registered refresh token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshSession {
    pub token: String,
    pub user_id: UserId,
    pub expires_at: DateTime<Utc>,
}

impl RefreshSession {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// Identity attached to a request once its access token has been verified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub role: Role,
}
