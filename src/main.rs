use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;

use codex_api_rust::catalog::CatalogResource;
use codex_api_rust::config::AppConfig;
use codex_api_rust::database::{PgDocumentStore, StoreError};
use codex_api_rust::models::user::USERS_COLLECTION;
use codex_api_rust::models::{Developer, Game, Genre, Platform, Publisher};
use codex_api_rust::routes;
use codex_api_rust::state::AppState;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, API_KEY, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = AppConfig::from_env();
    tracing::info!("Starting Codex API in {:?} mode", config.environment);
    config.log_missing_secrets();

    let connection_string = config
        .database
        .connection_string()
        .expect("DATABASE_URL is not a valid URL");

    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .acquire_timeout(Duration::from_secs(config.database.connect_timeout_secs))
        .connect(&connection_string)
        .await
        .unwrap_or_else(|e| panic!("failed to connect to database: {}", e));

    let store = PgDocumentStore::new(pool);
    bootstrap_collections(&store)
        .await
        .unwrap_or_else(|e| panic!("failed to prepare collections: {}", e));

    let state = AppState::new(config, Arc::new(store));
    let port = state.config.port;
    let app = routes::app(state);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    println!("🚀 Codex API server listening on http://{}", bind_addr);

    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .await
        .expect("server");
}

/// Idempotent storage bootstrap: one table per collection, plus the
/// uniqueness indexes that back registration conflicts.
async fn bootstrap_collections(store: &PgDocumentStore) -> Result<(), StoreError> {
    store
        .ensure_collections(&[
            Platform::COLLECTION,
            Game::COLLECTION,
            Genre::COLLECTION,
            Developer::COLLECTION,
            Publisher::COLLECTION,
            USERS_COLLECTION,
        ])
        .await?;

    store.ensure_unique(USERS_COLLECTION, "username").await?;
    store.ensure_unique(USERS_COLLECTION, "email").await?;
    Ok(())
}
