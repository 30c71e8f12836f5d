use async_trait::async_trait;
use sqlx::FromRow;
use sqlx::SqlitePool;

use crate::domain::product::models::CreateProductCommand;
use crate::domain::product::models::Price;
use crate::domain::product::models::Product;
use crate::domain::product::models::ProductId;
use crate::domain::product::models::ProductName;
use crate::domain::product::models::Stock;
use crate::domain::product::ports::ProductRepository;
use crate::product::errors::ProductError;

pub struct SqliteProductRepository {
    pool: SqlitePool,
}

impl SqliteProductRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ProductRow {
    id: i64,
    name: String,
    price_cents: i64,
    stock: i64,
}

impl TryFrom<ProductRow> for Product {
    type Error = ProductError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        Ok(Product {
            id: ProductId(row.id),
            name: ProductName::new(row.name)?,
            price: Price::from_cents(row.price_cents)?,
            stock: Stock::new(row.stock)?,
        })
    }
}

#[async_trait]
impl ProductRepository for SqliteProductRepository {
    async fn create(&self, command: &CreateProductCommand) -> Result<ProductId, ProductError> {
        let result = sqlx::query(
            r#"
            INSERT INTO products (name, price_cents, stock)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(command.name.as_str())
        .bind(command.price.cents())
        .bind(command.stock.value())
        .execute(&self.pool)
        .await
        .map_err(|e| ProductError::DatabaseError(e.to_string()))?;

        Ok(ProductId(result.last_insert_rowid()))
    }

    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, ProductError> {
        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT id, name, price_cents, stock
            FROM products
            WHERE id = ?
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ProductError::DatabaseError(e.to_string()))?;

        row.map(Product::try_from).transpose()
    }

    async fn list_all(&self) -> Result<Vec<Product>, ProductError> {
        let rows = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT id, name, price_cents, stock
            FROM products
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ProductError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(Product::try_from).collect()
    }

    async fn update_stock(&self, id: &ProductId, stock: Stock) -> Result<u64, ProductError> {
        let result = sqlx::query("UPDATE products SET stock = ? WHERE id = ?")
            .bind(stock.value())
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(|e| ProductError::DatabaseError(e.to_string()))?;

        Ok(result.rows_affected())
    }

    async fn count(&self) -> Result<i64, ProductError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| ProductError::DatabaseError(e.to_string()))
    }
}
