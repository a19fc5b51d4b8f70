//! Upesi Hub web server.
//!
//! Serves the JSON API behind the dashboard: plans and channel setup, the
//! agent catalog, custom agent requests and FAQs.

mod config;
mod error;
mod extract;
mod routes;
mod session;
mod state;

use database::Database;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,hub_web=debug")),
        )
        .init();

    // Load configuration
    let config = Config::from_env()?;
    info!(addr = %config.addr, "Starting hub web server");

    if config.admin_token.is_none() {
        info!("HUB_ADMIN_TOKEN not set, back-office routes disabled");
    }

    // Connect to database
    let db = Database::connect_with_pool_size(&config.database_url, config.pool_size).await?;
    db.migrate().await?;

    // Build application state
    let state = AppState::new(db, &config);

    // Build router
    let app = routes::router()
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    info!(addr = %config.addr, "Hub web server listening");
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
