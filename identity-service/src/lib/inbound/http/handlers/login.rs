use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::TokenPairData;
use crate::inbound::http::router::AppState;
use crate::user::models::Username;

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequestBody>,
) -> Result<ApiSuccess<TokenPairData>, ApiError> {
    // A name that cannot exist is just another unknown user
    let username = Username::new(body.username).map_err(|_| ApiError::unauthorized())?;

    state
        .session_service
        .login(&username, &body.password)
        .await
        .map_err(ApiError::from)
        .map(|tokens| ApiSuccess::new(StatusCode::OK, tokens.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequestBody {
    username: String,
    password: String,
}
