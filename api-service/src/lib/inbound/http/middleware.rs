use std::sync::Arc;

use auth::Authenticator;
use axum::extract::Request;
use axum::extract::State;
use axum::middleware::Next;
use axum::response::Response;
use http::header::AUTHORIZATION;
use http::HeaderMap;
use thiserror::Error;

use crate::domain::user::models::UserId;
use crate::inbound::http::handlers::ApiError;

/// Extension type to store authenticated user ID in request extensions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

/// Why the gate refused a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GateError {
    #[error("No token provided")]
    NoToken,

    #[error("Failed to authenticate token")]
    InvalidToken,
}

impl From<GateError> for ApiError {
    fn from(err: GateError) -> Self {
        ApiError::Unauthorized(err.to_string())
    }
}

/// Middleware that validates JWT tokens and adds the caller's identity to
/// request extensions. Performs no database access.
pub async fn authenticate(
    State(authenticator): State<Arc<Authenticator>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let user = authorize(req.headers(), &authenticator)?;

    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}

/// Resolve the caller from the `Authorization` header.
///
/// Expired, malformed and badly signed tokens are all reported as
/// `InvalidToken`.
pub fn authorize(
    headers: &HeaderMap,
    authenticator: &Authenticator,
) -> Result<AuthenticatedUser, GateError> {
    let token = extract_token_from_header(headers)?;

    let claims = authenticator.validate_token(token).map_err(|e| {
        tracing::warn!(error = %e, "JWT validation failed");
        GateError::InvalidToken
    })?;

    let user_id = claims.subject_as::<i64>().map(UserId).ok_or_else(|| {
        tracing::warn!(subject = %claims.sub, "Token subject is not a user id");
        GateError::InvalidToken
    })?;

    Ok(AuthenticatedUser { user_id })
}

fn extract_token_from_header(headers: &HeaderMap) -> Result<&str, GateError> {
    let auth_header = headers.get(AUTHORIZATION).ok_or(GateError::NoToken)?;

    if auth_header.is_empty() {
        return Err(GateError::NoToken);
    }

    let auth_str = auth_header.to_str().map_err(|_| {
        tracing::warn!("Authorization header is not valid ASCII");
        GateError::InvalidToken
    })?;

    // Legacy clients send the bare token without the scheme; verification
    // decides whether the remainder is acceptable.
    Ok(auth_str.strip_prefix("Bearer ").unwrap_or(auth_str))
}
