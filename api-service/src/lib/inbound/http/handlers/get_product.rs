use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::ProductData;
use crate::domain::product::models::ProductId;
use crate::domain::product::ports::ProductServicePort;
use crate::inbound::http::router::AppState;
use crate::product::errors::ProductError;

pub async fn get_product(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> Result<ApiSuccess<GetProductResponseData>, ApiError> {
    let product_id = ProductId::from_string(&product_id).map_err(ProductError::from)?;

    state
        .product_service
        .get_product(&product_id)
        .await
        .map_err(|e| match e {
            ProductError::DatabaseError(_) => ApiError::internal("Error getting product", e),
            _ => ApiError::from(e),
        })
        .map(|ref product| {
            ApiSuccess::new(
                StatusCode::OK,
                GetProductResponseData {
                    message: "success",
                    data: product.into(),
                },
            )
        })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GetProductResponseData {
    pub message: &'static str,
    pub data: ProductData,
}
