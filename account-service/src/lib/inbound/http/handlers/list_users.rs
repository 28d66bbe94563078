use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use super::ApiError;
use super::ApiQuery;
use super::ApiSuccess;
use super::ProfileData;
use crate::domain::authentication::ports::AuthServicePort;
use crate::domain::user::models::Pagination;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;

/// `?offset=&limit=`; a zero or missing limit returns everything after `offset`.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ListUsersQuery {
    pub offset: Option<u32>,
    pub limit: Option<u32>,
}

pub async fn list_users<AS: AuthServicePort, US: UserServicePort>(
    State(state): State<AppState<AS, US>>,
    ApiQuery(query): ApiQuery<ListUsersQuery>,
) -> Result<ApiSuccess<Vec<ProfileData>>, ApiError> {
    state
        .user_service
        .list_users(Pagination::new(query.offset, query.limit))
        .await
        .map_err(ApiError::from)
        .map(|users| ApiSuccess::new(StatusCode::OK, users.iter().map(ProfileData::from).collect()))
}
