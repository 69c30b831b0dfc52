//! PawHaven API server entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::EnvFilter;

use pawhaven_api::error::AppError;
use pawhaven_api::state::AppState;
use pawhaven_core::clock::SystemClock;
use pawhaven_event_store::PgEventStore;
use pawhaven_read_model::{PgAnimalReadModel, PgSponsorshipReadModel};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting PawHaven API server");

    // Read configuration from environment.
    let database_url = std::env::var("DATABASE_URL")
        .map_err(|_| AppError::Config("DATABASE_URL environment variable must be set".into()))?;
    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".to_string())
        .parse()
        .map_err(|e| AppError::Config(format!("PORT must be a valid u16: {e}")))?;

    // Create database connection pool and bring the schema up to date.
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&database_url)
        .await?;
    sqlx::migrate!("../../migrations").run(&pool).await?;

    // Build application state: the composition root. Everything downstream
    // receives these collaborators by injection.
    let app_state = AppState::new(
        Arc::new(SystemClock),
        Arc::new(PgEventStore::new(pool.clone())),
        Arc::new(PgAnimalReadModel::new(pool.clone())),
        Arc::new(PgSponsorshipReadModel::new(pool)),
    );

    // TODO: Replace CorsLayer::permissive() in `app()` with restricted
    // origins for production.
    let app = pawhaven_api::app(app_state);

    // Start server.
    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}
