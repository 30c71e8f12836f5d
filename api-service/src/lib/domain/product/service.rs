use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::product::models::CreateProductCommand;
use crate::domain::product::models::Product;
use crate::domain::product::models::ProductCatalog;
use crate::domain::product::models::ProductId;
use crate::domain::product::models::Stock;
use crate::product::errors::ProductError;
use crate::product::ports::ProductRepository;
use crate::product::ports::ProductServicePort;

/// Domain service implementation for product operations.
pub struct ProductService<PR>
where
    PR: ProductRepository,
{
    repository: Arc<PR>,
}

impl<PR> ProductService<PR>
where
    PR: ProductRepository,
{
    pub fn new(repository: Arc<PR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<PR> ProductServicePort for ProductService<PR>
where
    PR: ProductRepository,
{
    async fn create_product(&self, command: CreateProductCommand) -> Result<Product, ProductError> {
        let id = self.repository.create(&command).await?;

        tracing::info!(product_id = %id, name = command.name.as_str(), "Product created");

        Ok(Product {
            id,
            name: command.name,
            price: command.price,
            stock: command.stock,
        })
    }

    async fn get_product(&self, id: &ProductId) -> Result<Product, ProductError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id.to_string()))
    }

    async fn list_products(&self) -> Result<ProductCatalog, ProductError> {
        let products = self.repository.list_all().await?;
        Ok(ProductCatalog::from_products(products))
    }

    async fn update_stock(&self, id: &ProductId, stock: Stock) -> Result<(), ProductError> {
        let affected = self.repository.update_stock(id, stock).await?;

        if affected == 0 {
            return Err(ProductError::NotFound(id.to_string()));
        }

        tracing::debug!(product_id = %id, stock = stock.value(), "Stock updated");

        Ok(())
    }
}
