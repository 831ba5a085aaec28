use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn get_current_user(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedUser>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    state
        .user_service
        .get_user(&current.user_id)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::OK, user.into()))
}
