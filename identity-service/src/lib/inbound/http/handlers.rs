use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use crate::domain::session::errors::SessionError;
use crate::domain::session::models::TokenPair;
use crate::domain::user::models::User;
use crate::user::errors::PasswordError;
use crate::user::errors::UserError;

pub mod create_passwordless_user;
pub mod create_user;
pub mod get_user;
pub mod login;
pub mod refresh;
pub mod set_password;

const UNAUTHORIZED_MESSAGE: &str = "Unauthorized";
const INTERNAL_MESSAGE: &str = "Internal server error";

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    UnprocessableEntity(String),
    NotFound(String),
    Conflict(String),
    Unauthorized(String),
}

impl ApiError {
    /// The one message every authentication failure gets.
    pub fn unauthorized() -> Self {
        ApiError::Unauthorized(UNAUTHORIZED_MESSAGE.to_string())
    }

    /// Log the detail and hide it from the caller.
    fn internal(detail: impl std::fmt::Display) -> Self {
        tracing::error!(error = %detail, "Internal error");
        ApiError::InternalServerError(INTERNAL_MESSAGE.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
        };

        (status, Json(ApiResponseBody::new_error(status, message))).into_response()
    }
}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::Unauthorized => ApiError::unauthorized(),
            SessionError::InvalidInput(msg) => ApiError::UnprocessableEntity(msg),
            SessionError::UsernameAlreadyExists(_) => ApiError::Conflict(err.to_string()),
            SessionError::Internal(detail) => ApiError::internal(detail),
        }
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(_) => ApiError::NotFound(err.to_string()),
            UserError::UsernameAlreadyExists(_) => ApiError::Conflict(err.to_string()),
            UserError::InvalidUsername(_)
            | UserError::InvalidDisplayName(_)
            | UserError::Password(PasswordError::Empty) => {
                ApiError::UnprocessableEntity(err.to_string())
            }
            UserError::Password(_)
            | UserError::DatabaseError(_)
            | UserError::DatabaseTimeout(_) => ApiError::internal(err),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

impl ApiResponseBody<ApiErrorData> {
    pub fn new_error(status_code: StatusCode, message: String) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data: ApiErrorData { message },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
}

/// Outward view of a user. The password digest is never part of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserData {
    pub id: String,
    pub username: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.as_str().to_string(),
            name: user.name.as_str().to_string(),
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenPairData {
    pub token: String,
    pub refresh: String,
}

impl From<TokenPair> for TokenPairData {
    fn from(tokens: TokenPair) -> Self {
        Self {
            token: tokens.access_token,
            refresh: tokens.refresh_token,
        }
    }
}
