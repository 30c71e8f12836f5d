use std::sync::Arc;

use api_service::config::DatabaseConfig;
use api_service::config::SeedConfig;
use api_service::domain::product::service::ProductService;
use api_service::domain::user::service::UserService;
use api_service::inbound::http::router::create_router;
use api_service::outbound::database;
use api_service::outbound::repositories::SqliteProductRepository;
use api_service::outbound::repositories::SqliteUserRepository;
use api_service::outbound::seed;
use auth::Authenticator;
use auth::JwtHandler;
use auth::PasswordHasher;
use serde_json::json;
use sqlx::SqlitePool;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const TEST_TOKEN_TTL_SECONDS: i64 = 3600;

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub pool: SqlitePool,
    pub api_client: reqwest::Client,
    pub jwt_handler: JwtHandler,
}

impl TestApp {
    /// Spawn the application on an empty in-memory database.
    pub async fn spawn() -> Self {
        Self::spawn_with(false).await
    }

    /// Spawn the application with the admin user and sample products seeded.
    pub async fn spawn_seeded() -> Self {
        Self::spawn_with(true).await
    }

    async fn spawn_with(seeded: bool) -> Self {
        // Each pool over sqlite::memory: gets its own database
        let pool = database::connect(&DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
        })
        .await
        .expect("Failed to open in-memory database");
        database::migrate(&pool)
            .await
            .expect("Failed to run migrations");

        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let authenticator = Arc::new(
            Authenticator::new(TEST_SECRET, TEST_TOKEN_TTL_SECONDS).with_password_hasher(
                PasswordHasher::with_cost(8, 1, 1).expect("Failed to build password hasher"),
            ),
        );
        let user_repository = Arc::new(SqliteUserRepository::new(pool.clone()));
        let product_repository = Arc::new(SqliteProductRepository::new(pool.clone()));

        if seeded {
            seed::seed(
                user_repository.as_ref(),
                product_repository.as_ref(),
                &authenticator,
                &SeedConfig::default(),
            )
            .await
            .expect("Failed to seed database");
        }

        let user_service = Arc::new(UserService::new(
            user_repository,
            Arc::clone(&authenticator),
        ));
        let product_service = Arc::new(ProductService::new(product_repository));

        let router = create_router(user_service, product_service, authenticator);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            pool,
            api_client: reqwest::Client::new(),
            jwt_handler: JwtHandler::new(TEST_SECRET, TEST_TOKEN_TTL_SECONDS),
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Helper to make PATCH request with Bearer token
    pub fn patch_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .patch(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Drop a table so every later query against it fails in the store.
    pub async fn drop_table(&self, table: &str) {
        sqlx::query(&format!("DROP TABLE {}", table))
            .execute(&self.pool)
            .await
            .expect("Failed to drop table");
    }

    /// Sign a token directly; the gate never consults the store.
    pub fn token_for(&self, user_id: i64) -> String {
        self.jwt_handler
            .issue(user_id)
            .expect("Failed to issue token")
    }

    /// Register a user and return the issued token.
    pub async fn register(&self, username: &str, password: &str) -> String {
        let response = self
            .post("/api/auth/register")
            .json(&json!({
                "username": username,
                "password": password,
                "firstname": "Test",
                "lastname": "User"
            }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["token"]
            .as_str()
            .expect("Missing token in register response")
            .to_string()
    }

    /// Create a product through the API and return its id.
    pub async fn create_product(&self, token: &str, name: &str, price: f64, stock: i64) -> i64 {
        let response = self
            .post_authenticated("/api/products", token)
            .json(&json!({ "name": name, "price": price, "stock": stock }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["id"].as_i64().expect("Missing product id")
    }
}
