use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use super::parse_credentials;
use super::ApiError;
use super::ApiJson;
use super::ApiSuccess;
use super::AuthResponseData;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

pub async fn register(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<RegisterRequest>,
) -> Result<ApiSuccess<AuthResponseData>, ApiError> {
    let command = body.try_into_command()?;

    state
        .user_service
        .register(command)
        .await
        .map_err(|e| match e {
            // Duplicate usernames surface here too; they are not told apart.
            UserError::DatabaseError(_) | UserError::Internal(_) => {
                ApiError::internal("Error creating user", e)
            }
            _ => ApiError::from(e),
        })
        .map(|registration| {
            ApiSuccess::new(
                StatusCode::CREATED,
                AuthResponseData::granted(registration.token),
            )
        })
}

/// HTTP request body for registration (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterRequest {
    username: Option<String>,
    password: Option<String>,
    firstname: Option<String>,
    lastname: Option<String>,
}

impl RegisterRequest {
    fn try_into_command(self) -> Result<RegisterUserCommand, ApiError> {
        let (username, password) = parse_credentials(self.username, self.password)?;
        Ok(RegisterUserCommand::new(
            username,
            password,
            self.firstname.unwrap_or_default(),
            self.lastname.unwrap_or_default(),
        ))
    }
}
