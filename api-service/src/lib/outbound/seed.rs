use std::str::FromStr;

use auth::Authenticator;
use chrono::Utc;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::config::SeedConfig;
use crate::domain::product::models::CreateProductCommand;
use crate::domain::product::models::Price;
use crate::domain::product::models::ProductName;
use crate::domain::product::models::Stock;
use crate::domain::product::ports::ProductRepository;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserRepository;
use crate::product::errors::ProductError;
use crate::user::errors::UserError;

const SAMPLE_PRODUCTS: [(&str, &str, i64); 3] = [
    ("Laptop", "999.99", 10),
    ("Smartphone", "499.99", 15),
    ("Headphones", "79.99", 20),
];

/// Error raised while writing initial data; aborts startup.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Failed to seed users: {0}")]
    User(#[from] UserError),

    #[error("Failed to seed products: {0}")]
    Product(#[from] ProductError),

    #[error("Failed to hash admin password: {0}")]
    Password(#[from] auth::PasswordError),

    #[error("Invalid sample price: {0}")]
    Price(#[from] rust_decimal::Error),
}

/// What [`seed`] wrote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SeedReport {
    pub users_created: usize,
    pub products_created: usize,
}

/// Insert an administrative user and sample products into empty tables.
///
/// Each table is checked independently; a table with any rows is left alone.
pub async fn seed<UR, PR>(
    users: &UR,
    products: &PR,
    authenticator: &Authenticator,
    config: &SeedConfig,
) -> Result<SeedReport, SeedError>
where
    UR: UserRepository,
    PR: ProductRepository,
{
    let mut report = SeedReport::default();

    if users.count().await? == 0 {
        let admin = NewUser {
            username: Username::new(config.admin_username.clone()).map_err(UserError::from)?,
            password_hash: authenticator.hash_password(&config.admin_password)?,
            first_name: "Admin".to_string(),
            last_name: "User".to_string(),
            created_at: Utc::now(),
        };
        let id = users.create(&admin).await?;
        report.users_created += 1;
        tracing::info!(user_id = %id, username = %admin.username, "Seeded admin user");
    }

    if products.count().await? == 0 {
        for (name, price, stock) in SAMPLE_PRODUCTS {
            let command = CreateProductCommand::new(
                ProductName::new(name.to_string()).map_err(ProductError::from)?,
                Price::new(Decimal::from_str(price)?).map_err(ProductError::from)?,
                Stock::new(stock).map_err(ProductError::from)?,
            );
            products.create(&command).await?;
            report.products_created += 1;
        }
        tracing::info!(count = report.products_created, "Seeded sample products");
    }

    Ok(report)
}
