use axum::extract::State;
use axum::http::StatusCode;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiJson;
use super::ApiSuccess;
use crate::domain::authentication::errors::AuthError;
use crate::domain::authentication::models::RefreshedAccess;
use crate::domain::authentication::ports::AuthServicePort;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;

pub async fn refresh_token<AS: AuthServicePort, US: UserServicePort>(
    State(state): State<AppState<AS, US>>,
    body: Option<ApiJson<RefreshTokenRequest>>,
) -> Result<ApiSuccess<RefreshTokenResponseData>, ApiError> {
    let refresh_token = body
        .and_then(|ApiJson(body)| body.refresh_token)
        .ok_or(AuthError::UnregisteredRefreshToken)?;

    state
        .auth_service
        .refresh(&refresh_token)
        .await
        .map_err(ApiError::from)
        .map(|refreshed| ApiSuccess::new(StatusCode::OK, refreshed.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenRequest {
    #[serde(default)]
    refresh_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenResponseData {
    pub access_token: String,
    pub expired_date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

impl From<RefreshedAccess> for RefreshTokenResponseData {
    fn from(refreshed: RefreshedAccess) -> Self {
        Self {
            access_token: refreshed.access_token,
            expired_date: refreshed.expires_at,
            refresh_token: refreshed.refresh_token,
        }
    }
}
