use axum::extract::State;
use axum::http::StatusCode;
use rust_decimal::Decimal;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::ProductData;
use crate::domain::product::models::ProductCatalog;
use crate::domain::product::ports::ProductServicePort;
use crate::inbound::http::router::AppState;

pub async fn list_products(
    State(state): State<AppState>,
) -> Result<ApiSuccess<ListProductsResponseData>, ApiError> {
    state
        .product_service
        .list_products()
        .await
        .map_err(|e| ApiError::internal("Error getting products", e))
        .map(|ref catalog| ApiSuccess::new(StatusCode::OK, catalog.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListProductsResponseData {
    pub message: &'static str,
    pub data: Vec<ProductData>,
    pub meta: CatalogMetaData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogMetaData {
    pub count: usize,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub average_price: Option<Decimal>,
}

impl From<&ProductCatalog> for ListProductsResponseData {
    fn from(catalog: &ProductCatalog) -> Self {
        Self {
            message: "success",
            data: catalog.products.iter().map(ProductData::from).collect(),
            meta: CatalogMetaData {
                count: catalog.count,
                average_price: catalog.average_price,
            },
        }
    }
}
