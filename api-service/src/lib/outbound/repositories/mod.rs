pub mod product;
pub mod user;

pub use product::SqliteProductRepository;
pub use user::SqliteUserRepository;
