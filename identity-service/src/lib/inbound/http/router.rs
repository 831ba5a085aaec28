use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::routing::put;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::create_passwordless_user::create_passwordless_user;
use super::handlers::create_user::create_user;
use super::handlers::get_user::get_current_user;
use super::handlers::login::login;
use super::handlers::refresh::refresh;
use super::handlers::set_password::set_password;
use super::middleware::authenticate as auth_middleware;
use crate::domain::session::ports::AuthSessionPort;
use crate::domain::user::ports::UserServicePort;

#[derive(Clone)]
pub struct AppState {
    pub session_service: Arc<dyn AuthSessionPort>,
    pub user_service: Arc<dyn UserServicePort>,
}

pub fn create_router(
    session_service: Arc<dyn AuthSessionPort>,
    user_service: Arc<dyn UserServicePort>,
) -> Router {
    let state = AppState {
        session_service,
        user_service,
    };

    // The refresh route checks its own bearer token: it takes refresh tokens,
    // which the access-token middleware would reject.
    let public_routes = Router::new()
        .route("/api/users", post(create_user))
        .route("/api/users/passwordless", post(create_passwordless_user))
        .route("/api/auth/login", post(login))
        .route("/api/auth/refresh", post(refresh));

    let protected_routes = Router::new()
        .route("/api/users/me", get(get_current_user))
        .route("/api/users/me/password", put(set_password))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Headers are left out of the span: they carry bearer tokens.
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
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
