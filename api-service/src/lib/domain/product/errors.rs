use rust_decimal::Decimal;
use thiserror::Error;

/// Error for ProductId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProductIdError {
    #[error("Invalid product id: {0}")]
    InvalidFormat(String),
}

/// Error for ProductName validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProductNameError {
    #[error("Name is required")]
    Empty,
}

/// Error for Price validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PriceError {
    #[error("Price must be a non-negative number, got {0}")]
    Negative(Decimal),

    #[error("Price is too large: {0}")]
    TooLarge(Decimal),
}

/// Error for Stock validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StockError {
    #[error("Stock must be a non-negative integer, got {0}")]
    Negative(i64),
}

/// Top-level error for all product-related operations
#[derive(Debug, Clone, Error)]
pub enum ProductError {
    #[error("{0}")]
    InvalidProductId(#[from] ProductIdError),

    #[error("{0}")]
    InvalidName(#[from] ProductNameError),

    #[error("{0}")]
    InvalidPrice(#[from] PriceError),

    #[error("{0}")]
    InvalidStock(#[from] StockError),

    #[error("Product not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
