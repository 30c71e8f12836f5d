use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;

pub async fn similar_usernames(
    State(state): State<AppState>,
    Query(query): Query<SimilarUsernamesQuery>,
) -> Result<ApiSuccess<SimilarUsernamesResponseData>, ApiError> {
    state
        .user_service
        .find_similar_usernames(query.candidate.as_deref())
        .await
        .map_err(|e| ApiError::internal("Error finding similar usernames", e))
        .map(|groups| ApiSuccess::new(StatusCode::OK, SimilarUsernamesResponseData { groups }))
}

#[derive(Debug, Clone, Deserialize)]
pub struct SimilarUsernamesQuery {
    candidate: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SimilarUsernamesResponseData {
    pub groups: Vec<Vec<String>>,
}
