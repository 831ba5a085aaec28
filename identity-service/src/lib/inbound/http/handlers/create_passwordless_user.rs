use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::domain::session::models::PasswordlessAccount;
use crate::domain::user::models::CreatePasswordlessUserCommand;
use crate::domain::user::models::DisplayName;
use crate::domain::user::models::Username;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

pub async fn create_passwordless_user(
    State(state): State<AppState>,
    Json(body): Json<CreatePasswordlessUserRequest>,
) -> Result<ApiSuccess<CreatePasswordlessUserResponseData>, ApiError> {
    let command = body.try_into_command().map_err(ApiError::from)?;

    state
        .session_service
        .create_passwordless_account(command)
        .await
        .map_err(ApiError::from)
        .map(|account| ApiSuccess::new(StatusCode::CREATED, account.into()))
}

/// HTTP request body for creating a passwordless account (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreatePasswordlessUserRequest {
    username: String,
    name: String,
}

impl CreatePasswordlessUserRequest {
    fn try_into_command(self) -> Result<CreatePasswordlessUserCommand, UserError> {
        let username = Username::new(self.username)?;
        let name = DisplayName::new(self.name)?;
        Ok(CreatePasswordlessUserCommand::new(username, name))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreatePasswordlessUserResponseData {
    pub user: UserData,
    pub token: String,
    pub refresh: String,
}

impl From<PasswordlessAccount> for CreatePasswordlessUserResponseData {
    fn from(account: PasswordlessAccount) -> Self {
        Self {
            user: (&account.user).into(),
            token: account.tokens.access_token,
            refresh: account.tokens.refresh_token,
        }
    }
}
