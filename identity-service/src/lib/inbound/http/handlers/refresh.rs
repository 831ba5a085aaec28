use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;

use super::ApiError;
use super::ApiSuccess;
use super::TokenPairData;
use crate::inbound::http::middleware::bearer_token;
use crate::inbound::http::router::AppState;

/// Trade the bearer refresh token for a new pair.
pub async fn refresh(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<ApiSuccess<TokenPairData>, ApiError> {
    let token = bearer_token(&headers)?;

    state
        .session_service
        .refresh(token)
        .await
        .map_err(ApiError::from)
        .map(|tokens| ApiSuccess::new(StatusCode::OK, tokens.into()))
}
