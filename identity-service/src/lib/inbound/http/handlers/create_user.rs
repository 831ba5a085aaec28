use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use thiserror::Error;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::DisplayName;
use crate::domain::user::models::Username;
use crate::inbound::http::router::AppState;
use crate::user::errors::DisplayNameError;
use crate::user::errors::PasswordError;
use crate::user::errors::UsernameError;

pub async fn create_user(
    State(state): State<AppState>,
    Json(body): Json<CreateUserRequest>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    state
        .session_service
        .create_account(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::CREATED, user.into()))
}

/// HTTP request body for creating a password account (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateUserRequest {
    username: String,
    name: String,
    password: String,
}

#[derive(Debug, Clone, Error)]
enum ParseCreateUserRequestError {
    #[error("Invalid username: {0}")]
    Username(#[from] UsernameError),

    #[error("Invalid name: {0}")]
    Name(#[from] DisplayNameError),

    #[error("Invalid password: {0}")]
    Password(#[from] PasswordError),
}

impl CreateUserRequest {
    fn try_into_command(self) -> Result<CreateUserCommand, ParseCreateUserRequestError> {
        let username = Username::new(self.username)?;
        let name = DisplayName::new(self.name)?;
        if self.password.is_empty() {
            return Err(PasswordError::Empty.into());
        }
        Ok(CreateUserCommand::new(username, name, self.password))
    }
}

impl From<ParseCreateUserRequestError> for ApiError {
    fn from(err: ParseCreateUserRequestError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}
