use std::sync::Arc;

use api_service::config::Config;
use api_service::domain::product::service::ProductService;
use api_service::domain::user::service::UserService;
use api_service::inbound::http::router::create_router;
use api_service::outbound::database;
use api_service::outbound::repositories::SqliteProductRepository;
use api_service::outbound::repositories::SqliteUserRepository;
use api_service::outbound::seed;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "api-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        database_url = %config.database.url,
        http_port = config.server.http_port,
        seed_enabled = config.seed.enabled,
        "Configuration loaded"
    );

    let pool = database::connect(&config.database).await?;
    database::migrate(&pool).await?;

    let authenticator = Arc::new(config.authenticator()?);
    tracing::info!(
        token_ttl_seconds = authenticator.jwt_handler().expires_in_seconds(),
        "Authenticator ready"
    );
    let user_repository = Arc::new(SqliteUserRepository::new(pool.clone()));
    let product_repository = Arc::new(SqliteProductRepository::new(pool));

    if config.seed.enabled {
        let report = seed::seed(
            user_repository.as_ref(),
            product_repository.as_ref(),
            &authenticator,
            &config.seed,
        )
        .await?;
        tracing::info!(
            users_created = report.users_created,
            products_created = report.products_created,
            "Seed completed"
        );
    }

    let user_service = Arc::new(UserService::new(
        user_repository,
        Arc::clone(&authenticator),
    ));
    let product_service = Arc::new(ProductService::new(product_repository));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(user_service, product_service, authenticator);

    if let Err(e) = axum::serve(http_listener, http_application).await {
        tracing::error!(error = %e, "Server error");
        return Err(e.into());
    }

    tracing::info!("Server exited successfully");
    Ok(())
}
