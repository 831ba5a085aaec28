use axum::extract::Request;
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;

use crate::domain::session::models::Purpose;
use crate::domain::user::models::UserId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Extension type to store the authenticated user in request extensions
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub username: String,
}

/// Middleware that accepts only access (`authorize`) tokens and adds the
/// caller to request extensions
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(req.headers())?;

    let claims = state
        .session_service
        .verify_token(token, Purpose::Authorize)
        .map_err(ApiError::from)?;

    req.extensions_mut().insert(AuthenticatedUser {
        user_id: claims.user_id,
        username: claims.username,
    });

    Ok(next.run(req).await)
}

/// Extract the token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, ApiError> {
    let header = headers.get(AUTHORIZATION).ok_or_else(|| {
        tracing::debug!("Missing Authorization header");
        ApiError::unauthorized()
    })?;

    let value = header.to_str().map_err(|_| ApiError::unauthorized())?;

    value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| {
            tracing::debug!("Authorization header is not a bearer token");
            ApiError::unauthorized()
        })
}
