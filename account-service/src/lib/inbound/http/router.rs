use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::delete;
use axum::routing::get;
use axum::routing::patch;
use axum::routing::post;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::delete_user::delete_user;
use super::handlers::get_self::get_self;
use super::handlers::get_user::get_user;
use super::handlers::health::health;
use super::handlers::list_users::list_users;
use super::handlers::login::login;
use super::handlers::logout::logout;
use super::handlers::refresh_token::refresh_token;
use super::handlers::signup::signup;
use super::handlers::update_self::update_self;
use super::handlers::update_user::update_user;
use super::middleware::authenticate;
use super::middleware::require_admin;
use crate::domain::authentication::ports::AuthServicePort;
use crate::domain::user::ports::UserServicePort;

pub struct AppState<AS, US>
where
    AS: AuthServicePort,
    US: UserServicePort,
{
    pub auth_service: Arc<AS>,
    pub user_service: Arc<US>,
}

impl<AS, US> Clone for AppState<AS, US>
where
    AS: AuthServicePort,
    US: UserServicePort,
{
    fn clone(&self) -> Self {
        Self {
            auth_service: Arc::clone(&self.auth_service),
            user_service: Arc::clone(&self.user_service),
        }
    }
}

pub fn create_router<AS, US>(auth_service: Arc<AS>, user_service: Arc<US>) -> Router
where
    AS: AuthServicePort,
    US: UserServicePort,
{
    let state = AppState {
        auth_service,
        user_service,
    };

    let public_routes = Router::new()
        .route("/health", get(health))
        .route("/signup", post(signup::<AS, US>))
        .route("/login", post(login::<AS, US>))
        .route("/refresh_token", post(refresh_token::<AS, US>));

    let protected_routes = Router::new()
        .route("/logout", post(logout::<AS, US>))
        .route("/getself", get(get_self::<AS, US>))
        .route("/update_self", patch(update_self::<AS, US>))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            authenticate::<AS, US>,
        ));

    // Layers run outermost-last: authenticate, then require_admin
    let admin_routes = Router::new()
        .route("/get/:id", get(get_user::<AS, US>))
        .route("/all", get(list_users::<AS, US>))
        .route("/update/:id", patch(update_user::<AS, US>))
        .route("/delete/:id", delete(delete_user::<AS, US>))
        .route_layer(middleware::from_fn(require_admin))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            authenticate::<AS, US>,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .merge(admin_routes)
        .layer(
            ServiceBuilder::new()
                .layer(trace_layer)
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
