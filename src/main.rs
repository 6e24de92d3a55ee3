//! Server binary: load config, connect the pool, serve the API and frontend.

use pharmacy_api::{app, db, AppConfig, AppState};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("pharmacy_api=info".parse()?))
        .init();

    let config = AppConfig::from_env();
    let pool = db::connect(&config.db).await?;
    tracing::info!(
        host = %config.db.host,
        database = %config.db.database,
        pool_size = config.db.pool_size,
        "connected to MySQL"
    );

    let state = AppState { pool };
    let router = app(state, &config.static_dir);

    let listener = TcpListener::bind(&config.listen_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, router).await?;
    Ok(())
}
