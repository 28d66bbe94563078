use axum::extract::Request;
use axum::extract::State;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;

use crate::domain::authentication::models::AuthenticatedUser;
use crate::domain::authentication::ports::AuthServicePort;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Validates the bearer access token and stores the caller's identity in
/// the request extensions.
pub async fn authenticate<AS: AuthServicePort, US: UserServicePort>(
    State(state): State<AppState<AS, US>>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_token_from_header(&req)?;

    let identity = state.auth_service.authenticate(token).map_err(|e| {
        tracing::warn!(error = %e, "Access token rejected");
        ApiError::Unauthorized("Invalid or expired token".to_string()).into_response()
    })?;

    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}

/// Admits only callers whose verified role is `ADMIN`. Must run after
/// [`authenticate`].
pub async fn require_admin(req: Request, next: Next) -> Result<Response, Response> {
    let identity = req
        .extensions()
        .get::<AuthenticatedUser>()
        .copied()
        .ok_or_else(|| ApiError::Unauthorized("Not authenticated".to_string()).into_response())?;

    if !identity.role.is_admin() {
        tracing::warn!(user_id = %identity.user_id, role = %identity.role, "Admin route refused");
        return Err(ApiError::Forbidden("Admin role required".to_string()).into_response());
    }

    Ok(next.run(req).await)
}

fn extract_token_from_header(req: &Request) -> Result<&str, Response> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(|| {
            ApiError::Unauthorized("Missing Authorization header".to_string()).into_response()
        })?;

    let auth_str = auth_header.to_str().map_err(|_| {
        ApiError::Unauthorized("Invalid Authorization header".to_string()).into_response()
    })?;

    auth_str.strip_prefix("Bearer ").ok_or_else(|| {
        ApiError::Unauthorized(
            "Invalid Authorization header format. Expected: Bearer <token>".to_string(),
        )
        .into_response()
    })
}
