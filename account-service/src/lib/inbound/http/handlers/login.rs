use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use super::ApiError;
use super::ApiJson;
use super::ApiSuccess;
use super::TokenPairData;
use crate::domain::authentication::errors::AuthError;
use crate::domain::authentication::models::LoginCommand;
use crate::domain::authentication::models::LoginIdentifier;
use crate::domain::authentication::ports::AuthServicePort;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;

pub async fn login<AS: AuthServicePort, US: UserServicePort>(
    State(state): State<AppState<AS, US>>,
    ApiJson(body): ApiJson<LoginRequest>,
) -> Result<ApiSuccess<TokenPairData>, ApiError> {
    state
        .auth_service
        .login(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|pair| ApiSuccess::new(StatusCode::OK, pair.into()))
}

/// Either identifier may be given; the username wins when both are.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    username: Option<String>,
    password: String,
}

impl LoginRequest {
    fn try_into_command(self) -> Result<LoginCommand, ApiError> {
        // A malformed identifier cannot match any stored account
        let identifier = match (self.username, self.email) {
            (Some(username), _) => Username::new(username.clone())
                .map(LoginIdentifier::Username)
                .map_err(|_| AuthError::UnknownAccount(format!("username {}", username)))?,
            (None, Some(email)) => EmailAddress::new(email.clone())
                .map(LoginIdentifier::Email)
                .map_err(|_| AuthError::UnknownAccount(format!("email {}", email)))?,
            (None, None) => {
                return Err(ApiError::UnprocessableEntity(
                    "Either email or username is required".to_string(),
                ))
            }
        };

        Ok(LoginCommand {
            identifier,
            password: self.password,
        })
    }
}
