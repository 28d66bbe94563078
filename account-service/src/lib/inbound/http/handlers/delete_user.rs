use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::ApiError;
use super::ApiSuccess;
use super::SuccessData;
use crate::domain::authentication::ports::AuthServicePort;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

pub async fn delete_user<AS: AuthServicePort, US: UserServicePort>(
    State(state): State<AppState<AS, US>>,
    Path(id): Path<String>,
) -> Result<ApiSuccess<SuccessData>, ApiError> {
    let user_id = UserId::from_string(&id).map_err(UserError::from)?;

    state
        .user_service
        .delete_user(&user_id)
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::new(StatusCode::OK, SuccessData::ok()))
}
