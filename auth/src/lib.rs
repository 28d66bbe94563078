//! Authentication utilities library
//!
//! Storage-agnostic building blocks for account services:
//! - Password hashing (Argon2id, configurable work factor)
//! - JWT claims and HS256 encoding/decoding
//! - Access/refresh token issuance and verification
//! - The closed set of roles carried in access tokens
//!
//! Tracking which refresh tokens are still live is left to the service.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! assert!(!hasher.verify("not_my_password", &hash).unwrap());
//! ```
//!
//! ## Token Pair
//! ```
//! use auth::{Role, TokenIssuer};
//!
//! let issuer = TokenIssuer::new(b"secret_key_at_least_32_bytes_long!");
//!
//! let access = issuer.issue_access("user123", Role::User).unwrap();
//! let refresh = issuer.issue_refresh("user123").unwrap();
//!
//! let claims = issuer.verify_access(&access.token).unwrap();
//! assert_eq!(claims.role, Some(Role::User));
//!
//! // A refresh token is never accepted as an access token
//! assert!(issuer.verify_access(&refresh.token).is_err());
//! ```

pub mod issuer;
pub mod jwt;
pub mod password;
pub mod role;

// Re-export commonly used items
pub use issuer::IssuedToken;
pub use issuer::TokenIssuer;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::TokenKind;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use role::Role;
pub use role::RoleError;
