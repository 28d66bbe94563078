use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::jwt::TokenKind;
use crate::role::Role;

pub const DEFAULT_ACCESS_TOKEN_DAYS: i64 = 7;
pub const DEFAULT_REFRESH_TOKEN_DAYS: i64 = 30;

/// Issues and verifies the access/refresh token pair.
///
/// Access tokens are stateless: signature, expiry and kind are the whole
/// story. Refresh tokens additionally have to be tracked by the caller,
/// this type only vouches for their cryptographic validity.
pub struct TokenIssuer {
    jwt_handler: JwtHandler,
    access_lifetime: Duration,
    refresh_lifetime: Duration,
}

/// A freshly signed token together with the claims it carries.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub claims: Claims,
}

impl IssuedToken {
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.claims.expires_at()
    }
}

impl TokenIssuer {
    /// Create an issuer with the default lifetimes (7 days access, 30 days refresh).
    ///
    /// # Arguments
    /// * `secret` - Secret key for JWT signing
    pub fn new(secret: &[u8]) -> Self {
        Self {
            jwt_handler: JwtHandler::new(secret),
            access_lifetime: Duration::days(DEFAULT_ACCESS_TOKEN_DAYS),
            refresh_lifetime: Duration::days(DEFAULT_REFRESH_TOKEN_DAYS),
        }
    }

    /// Override the token lifetimes.
    pub fn with_lifetimes(mut self, access: Duration, refresh: Duration) -> Self {
        self.access_lifetime = access;
        self.refresh_lifetime = refresh;
        self
    }

    /// Sign an access token for `subject` carrying `role`.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token generation failed
    pub fn issue_access(&self, subject: impl ToString, role: Role) -> Result<IssuedToken, JwtError> {
        self.sign(Claims::access(subject, role, self.access_lifetime))
    }

    /// Sign a refresh token for `subject`.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token generation failed
    pub fn issue_refresh(&self, subject: impl ToString) -> Result<IssuedToken, JwtError> {
        self.sign(Claims::refresh(subject, self.refresh_lifetime))
    }

    /// Sign arbitrary claims. Exposed so callers can mint tokens with a
    /// chosen expiration.
    pub fn sign(&self, claims: Claims) -> Result<IssuedToken, JwtError> {
        let token = self.jwt_handler.encode(&claims)?;
        Ok(IssuedToken { token, claims })
    }

    /// Verify an access token and return its claims.
    ///
    /// # Errors
    /// * `TokenExpired` - Token has expired
    /// * `InvalidToken` - Bad signature or malformed token
    /// * `WrongTokenKind` - A refresh token was presented
    /// * `MissingClaim` - The role claim is absent
    pub fn verify_access(&self, token: &str) -> Result<Claims, JwtError> {
        let claims = self.verify(token, TokenKind::Access)?;

        if claims.role.is_none() {
            return Err(JwtError::MissingClaim("role".to_string()));
        }

        Ok(claims)
    }

    /// Verify a refresh token and return its claims.
    ///
    /// # Errors
    /// * `TokenExpired` - Token has expired
    /// * `InvalidToken` - Bad signature or malformed token
    /// * `WrongTokenKind` - An access token was presented
    pub fn verify_refresh(&self, token: &str) -> Result<Claims, JwtError> {
        self.verify(token, TokenKind::Refresh)
    }

    fn verify(&self, token: &str, expected: TokenKind) -> Result<Claims, JwtError> {
        let claims: Claims = self.jwt_handler.decode(token)?;

        if claims.typ != expected {
            return Err(JwtError::WrongTokenKind {
                expected,
                actual: claims.typ,
            });
        }

        Ok(claims)
    }
}
