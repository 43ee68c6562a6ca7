//! storefront — order pricing and persistence service
//!
//! Long-running service that:
//! - Seeds and migrates the embedded store at startup (before serving)
//! - Lists the product catalog
//! - Accepts orders with optional promotion codes and prices them
//! - Serves confirmation records for placed orders

use storefront::{AppState, Config};
use storefront::api;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // Load .env file
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "storefront=info,tower_http=info".into()),
        )
        .init();

    let config = Config::from_env();

    tracing::info!("Starting storefront");

    // Open the store and run the schema manager to completion before
    // accepting any order workflow call
    let state = AppState::new(&config).await?;

    let app = api::create_router(state);

    let addr = format!("0.0.0.0:{}", config.http_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("storefront HTTP listening on {addr}");

    axum::serve(listener, app).await?;

    Ok(())
}
