use async_trait::async_trait;

use crate::domain::product::models::CreateProductCommand;
use crate::domain::product::models::Product;
use crate::domain::product::models::ProductCatalog;
use crate::domain::product::models::ProductId;
use crate::domain::product::models::Stock;
use crate::product::errors::ProductError;

/// Product operations; every caller reaches these through the authentication gate.
#[async_trait]
pub trait ProductServicePort: Send + Sync + 'static {
    /// # Errors
    /// * `DatabaseError` - Insert failed
    async fn create_product(&self, command: CreateProductCommand) -> Result<Product, ProductError>;

    /// # Errors
    /// * `NotFound` - No product has this id
    /// * `DatabaseError` - Lookup failed
    async fn get_product(&self, id: &ProductId) -> Result<Product, ProductError>;

    /// All products with count and average price.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_products(&self) -> Result<ProductCatalog, ProductError>;

    /// Overwrite the stock of one product. Concurrent updates to the same
    /// product resolve last-write-wins.
    ///
    /// # Errors
    /// * `NotFound` - No row was affected
    /// * `DatabaseError` - Update failed
    async fn update_stock(&self, id: &ProductId, stock: Stock) -> Result<(), ProductError>;
}

/// Persistence operations for products.
#[async_trait]
pub trait ProductRepository: Send + Sync + 'static {
    /// Persist a new product and return its store-assigned id.
    async fn create(&self, command: &CreateProductCommand) -> Result<ProductId, ProductError>;

    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, ProductError>;

    /// Retrieve all products ordered by id.
    async fn list_all(&self) -> Result<Vec<Product>, ProductError>;

    /// Set the stock of a product and return the number of affected rows.
    async fn update_stock(&self, id: &ProductId, stock: Stock) -> Result<u64, ProductError>;

    async fn count(&self) -> Result<i64, ProductError>;
}
