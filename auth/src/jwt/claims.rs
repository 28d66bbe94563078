use std::fmt;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use crate::role::Role;

/// Distinguishes short-lived access tokens from refresh tokens.
///
/// Both kinds are signed with the same key, so the kind travels inside the
/// claims and is checked on every verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Access => f.write_str("access"),
            TokenKind::Refresh => f.write_str("refresh"),
        }
    }
}

/// JWT claims issued by this library.
///
/// Access tokens carry the subject's role; refresh tokens carry only the
/// subject. `jti` keeps two tokens minted in the same second distinct.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Subject (user identifier)
    pub sub: String,

    /// Token kind
    pub typ: TokenKind,

    /// Role of the subject at issue time (access tokens only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// JWT ID (unique token identifier)
    pub jti: String,
}

impl Claims {
    /// Claims for an access token valid for `lifetime` from now.
    pub fn access(subject: impl ToString, role: Role, lifetime: Duration) -> Self {
        Self::issued_now(subject, TokenKind::Access, Some(role), lifetime)
    }

    /// Claims for a refresh token valid for `lifetime` from now.
    pub fn refresh(subject: impl ToString, lifetime: Duration) -> Self {
        Self::issued_now(subject, TokenKind::Refresh, None, lifetime)
    }

    fn issued_now(
        subject: impl ToString,
        typ: TokenKind,
        role: Option<Role>,
        lifetime: Duration,
    ) -> Self {
        let now = Utc::now();
        let expiration = now + lifetime;

        Self {
            sub: subject.to_string(),
            typ,
            role,
            iat: now.timestamp(),
            exp: expiration.timestamp(),
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// Override the expiration (Unix timestamp).
    pub fn with_expiration(mut self, exp: i64) -> Self {
        self.exp = exp;
        self
    }

    /// Expiration as a UTC datetime.
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    /// Check if token is expired.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp < current_timestamp
    }
}
