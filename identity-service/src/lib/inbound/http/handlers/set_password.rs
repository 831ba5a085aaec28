use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

/// HTTP request body for setting a password (raw JSON)
#[derive(Debug, Deserialize)]
pub struct SetPasswordRequest {
    pub password: String,
}

pub async fn set_password(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedUser>,
    Json(body): Json<SetPasswordRequest>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    state
        .user_service
        .set_password(&current.user_id, &body.password)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::OK, user.into()))
}
