use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use super::ApiError;
use super::ApiJson;
use super::ApiSuccess;
use super::SuccessData;
use crate::domain::authentication::ports::AuthServicePort;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;

/// Forget the presented refresh token. A missing body or token is still a success.
pub async fn logout<AS: AuthServicePort, US: UserServicePort>(
    State(state): State<AppState<AS, US>>,
    body: Option<ApiJson<LogoutRequest>>,
) -> Result<ApiSuccess<SuccessData>, ApiError> {
    if let Some(refresh_token) = body.and_then(|ApiJson(body)| body.refresh_token) {
        state.auth_service.logout(&refresh_token).await?;
    }

    Ok(ApiSuccess::new(StatusCode::OK, SuccessData::ok()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogoutRequest {
    #[serde(default)]
    refresh_token: Option<String>,
}
