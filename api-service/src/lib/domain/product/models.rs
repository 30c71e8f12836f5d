use std::fmt;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal::RoundingStrategy;

use crate::product::errors::PriceError;
use crate::product::errors::ProductIdError;
use crate::product::errors::ProductNameError;
use crate::product::errors::StockError;

/// Product entity.
///
/// Products have no owner: any authenticated caller may read or change them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: ProductId,
    pub name: ProductName,
    pub price: Price,
    pub stock: Stock,
}

/// Store-assigned product identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProductId(pub i64);

impl ProductId {
    /// Parse a product id from a path segment.
    ///
    /// # Errors
    /// * `InvalidFormat` - Not a base-10 integer
    pub fn from_string(s: &str) -> Result<Self, ProductIdError> {
        s.parse::<i64>()
            .map(ProductId)
            .map_err(|_| ProductIdError::InvalidFormat(s.to_string()))
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Non-empty product name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductName(String);

impl ProductName {
    /// # Errors
    /// * `Empty` - Name is empty or whitespace only
    pub fn new(name: String) -> Result<Self, ProductNameError> {
        if name.trim().is_empty() {
            return Err(ProductNameError::Empty);
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Non-negative price with two decimal places, held as integer cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Price {
    cents: i64,
}

impl Price {
    /// Create a price, rounding half-away-from-zero to whole cents.
    ///
    /// # Errors
    /// * `Negative` - Amount is below zero
    /// * `TooLarge` - Amount does not fit in 64-bit cents
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative(amount));
        }

        let cents = amount
            .checked_mul(Decimal::ONE_HUNDRED)
            .map(|c| c.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
            .and_then(|c| c.to_i64())
            .ok_or(PriceError::TooLarge(amount))?;

        Ok(Self { cents })
    }

    /// # Errors
    /// * `Negative` - Stored value is below zero
    pub fn from_cents(cents: i64) -> Result<Self, PriceError> {
        if cents < 0 {
            return Err(PriceError::Negative(Decimal::new(cents, 2)));
        }
        Ok(Self { cents })
    }

    pub fn cents(&self) -> i64 {
        self.cents
    }

    pub fn amount(&self) -> Decimal {
        Decimal::new(self.cents, 2)
    }
}

/// Non-negative stock quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Stock(i64);

impl Stock {
    /// # Errors
    /// * `Negative` - Quantity is below zero
    pub fn new(quantity: i64) -> Result<Self, StockError> {
        if quantity < 0 {
            return Err(StockError::Negative(quantity));
        }
        Ok(Self(quantity))
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

/// Command to create a new product
#[derive(Debug, Clone)]
pub struct CreateProductCommand {
    pub name: ProductName,
    pub price: Price,
    pub stock: Stock,
}

impl CreateProductCommand {
    pub fn new(name: ProductName, price: Price, stock: Stock) -> Self {
        Self { name, price, stock }
    }
}

/// All products plus aggregates computed at read time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCatalog {
    pub products: Vec<Product>,
    pub count: usize,
    /// Mean price rounded to cents; `None` when there are no products.
    pub average_price: Option<Decimal>,
}

impl ProductCatalog {
    pub fn from_products(products: Vec<Product>) -> Self {
        let count = products.len();
        let average_price = if count == 0 {
            None
        } else {
            let total: Decimal = products.iter().map(|p| p.price.amount()).sum();
            Some(
                (total / Decimal::from(count))
                    .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
            )
        };

        Self {
            products,
            count,
            average_price,
        }
    }
}
