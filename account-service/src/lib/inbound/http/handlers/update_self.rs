use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use chrono::NaiveDate;
use serde::Deserialize;

use super::ApiError;
use super::ApiJson;
use super::ApiSuccess;
use super::ProfileData;
use crate::domain::authentication::models::AuthenticatedUser;
use crate::domain::authentication::ports::AuthServicePort;
use crate::domain::user::models::DisplayName;
use crate::domain::user::models::UpdateProfileCommand;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

/// HTTP request body for a self-service profile update (raw JSON)
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSelfRequest {
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub birthday: Option<NaiveDate>,
    #[serde(default)]
    pub info: Option<String>,
}

impl UpdateSelfRequest {
    pub(super) fn try_into_command(self) -> Result<UpdateProfileCommand, UserError> {
        Ok(UpdateProfileCommand {
            display_name: self.display_name.map(DisplayName::new).transpose()?,
            username: self.username.map(Username::new).transpose()?,
            birthday: self.birthday,
            info: self.info,
        })
    }
}

pub async fn update_self<AS: AuthServicePort, US: UserServicePort>(
    State(state): State<AppState<AS, US>>,
    Extension(identity): Extension<AuthenticatedUser>,
    ApiJson(req): ApiJson<UpdateSelfRequest>,
) -> Result<ApiSuccess<ProfileData>, ApiError> {
    let command = req.try_into_command()?;

    state
        .user_service
        .update_profile(&identity.user_id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::OK, user.into()))
}
