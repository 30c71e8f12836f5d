use axum::extract::State;
use axum::http::StatusCode;
use rust_decimal::Decimal;
use serde::Deserialize;

use super::ApiError;
use super::ApiJson;
use super::ApiSuccess;
use super::ProductData;
use crate::domain::product::models::CreateProductCommand;
use crate::domain::product::models::Price;
use crate::domain::product::models::ProductName;
use crate::domain::product::models::Stock;
use crate::domain::product::ports::ProductServicePort;
use crate::inbound::http::router::AppState;
use crate::product::errors::ProductError;

pub async fn create_product(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CreateProductRequest>,
) -> Result<ApiSuccess<ProductData>, ApiError> {
    let command = body.try_into_command()?;

    state
        .product_service
        .create_product(command)
        .await
        .map_err(|e| match e {
            ProductError::DatabaseError(_) => ApiError::internal("Error creating product", e),
            _ => ApiError::from(e),
        })
        .map(|ref product| ApiSuccess::new(StatusCode::CREATED, product.into()))
}

/// HTTP request body for creating a product. A missing stock means zero.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateProductRequest {
    name: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    price: Option<Decimal>,
    stock: Option<i64>,
}

impl CreateProductRequest {
    fn try_into_command(self) -> Result<CreateProductCommand, ApiError> {
        let name = ProductName::new(self.name.unwrap_or_default()).map_err(ProductError::from)?;
        let price = self
            .price
            .ok_or_else(|| ApiError::BadRequest("Price is required".to_string()))
            .and_then(|amount| Price::new(amount).map_err(|e| ProductError::from(e).into()))?;
        let stock = Stock::new(self.stock.unwrap_or(0)).map_err(ProductError::from)?;

        Ok(CreateProductCommand::new(name, price, stock))
    }
}
