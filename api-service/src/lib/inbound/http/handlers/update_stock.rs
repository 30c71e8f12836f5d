use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiJson;
use super::ApiSuccess;
use crate::domain::product::models::ProductId;
use crate::domain::product::models::Stock;
use crate::domain::product::ports::ProductServicePort;
use crate::inbound::http::router::AppState;
use crate::product::errors::ProductError;

pub async fn update_stock(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
    ApiJson(body): ApiJson<UpdateStockRequest>,
) -> Result<ApiSuccess<UpdateStockResponseData>, ApiError> {
    let product_id = ProductId::from_string(&product_id).map_err(ProductError::from)?;
    let stock = Stock::new(body.stock).map_err(ProductError::from)?;

    state
        .product_service
        .update_stock(&product_id, stock)
        .await
        .map_err(|e| match e {
            ProductError::DatabaseError(_) => ApiError::internal("Failed to update stock", e),
            _ => ApiError::from(e),
        })
        .map(|_| ApiSuccess::new(StatusCode::OK, UpdateStockResponseData { success: true }))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdateStockRequest {
    stock: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateStockResponseData {
    pub success: bool,
}
