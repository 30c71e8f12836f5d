use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiError;
use super::ApiSuccess;
use super::UserProfileData;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn list_users(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
) -> Result<ApiSuccess<Vec<UserProfileData>>, ApiError> {
    tracing::debug!(caller = %caller.user_id, "Listing users");

    state
        .user_service
        .list_users()
        .await
        .map_err(|e| ApiError::internal("Error getting users", e))
        .map(|profiles| {
            ApiSuccess::new(
                StatusCode::OK,
                profiles.iter().map(UserProfileData::from).collect(),
            )
        })
}
