use std::fmt;

use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::product::models::Product;
use crate::domain::user::models::Password;
use crate::domain::user::models::UserProfile;
use crate::domain::user::models::Username;
use crate::product::errors::ProductError;
use crate::user::errors::UserError;

pub mod create_product;
pub mod get_product;
pub mod health;
pub mod list_products;
pub mod list_users;
pub mod login;
pub mod register;
pub mod similar_usernames;
pub mod update_stock;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<T>);

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
        ApiSuccess(status, Json(data))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

/// JSON body extractor whose rejections are answered as [`ApiError`].
#[derive(Debug, FromRequest)]
#[from_request(via(Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    BadRequest(String),
    NotFound(String),
    Unauthorized(String),
    /// Credential mismatch on login; answered as `{auth: false, token: null}`.
    InvalidCredentials,
}

impl ApiError {
    /// Log the underlying failure and answer with a message that hides it.
    pub fn internal(message: &str, cause: impl fmt::Display) -> Self {
        tracing::error!(error = %cause, "{}", message);
        ApiError::InternalServerError(message.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::InvalidCredentials => {
                return (StatusCode::UNAUTHORIZED, Json(AuthResponseData::denied()))
                    .into_response();
            }
        };

        (status, Json(ApiErrorData { error: message })).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection.body_text(), "Rejected request body");
        ApiError::BadRequest(format!("Invalid request body: {}", rejection.body_text()))
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::InvalidUsername(_) | UserError::InvalidPassword(_) => {
                ApiError::BadRequest(CREDENTIALS_REQUIRED.to_string())
            }
            UserError::NotFoundByUsername(_) => ApiError::NotFound("No user found.".to_string()),
            UserError::InvalidCredentials => ApiError::InvalidCredentials,
            UserError::DatabaseError(_) | UserError::Internal(_) => {
                ApiError::internal("Error on the server.", err)
            }
        }
    }
}

impl From<ProductError> for ApiError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::InvalidProductId(_)
            | ProductError::InvalidName(_)
            | ProductError::InvalidPrice(_)
            | ProductError::InvalidStock(_) => ApiError::BadRequest(err.to_string()),
            ProductError::NotFound(_) => ApiError::NotFound("Product not found".to_string()),
            ProductError::DatabaseError(_) => ApiError::internal("Error on the server.", err),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub error: String,
}

const CREDENTIALS_REQUIRED: &str = "Username and password are required";

/// Validate the credential pair shared by register and login.
fn parse_credentials(
    username: Option<String>,
    password: Option<String>,
) -> Result<(Username, Password), ApiError> {
    let username = Username::new(username.unwrap_or_default()).map_err(UserError::from)?;
    let password = Password::new(password.unwrap_or_default()).map_err(UserError::from)?;
    Ok((username, password))
}

/// Body of register responses and of rejected logins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthResponseData {
    pub auth: bool,
    pub token: Option<String>,
}

impl AuthResponseData {
    pub fn granted(token: String) -> Self {
        Self {
            auth: true,
            token: Some(token),
        }
    }

    pub fn denied() -> Self {
        Self {
            auth: false,
            token: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserProfileData {
    pub id: i64,
    pub username: String,
    pub firstname: String,
    pub lastname: String,
    pub created_at: DateTime<Utc>,
}

impl From<&UserProfile> for UserProfileData {
    fn from(profile: &UserProfile) -> Self {
        Self {
            id: profile.id.0,
            username: profile.username.clone(),
            firstname: profile.first_name.clone(),
            lastname: profile.last_name.clone(),
            created_at: profile.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductData {
    pub id: i64,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub stock: i64,
}

impl From<&Product> for ProductData {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.0,
            name: product.name.as_str().to_string(),
            price: product.price.amount(),
            stock: product.stock.value(),
        }
    }
}
