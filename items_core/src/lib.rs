//! Core library for the items service: persistence, repositories and HTTP handlers.

pub mod config;
pub mod database;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod items;
pub mod middleware;
pub mod models;
pub mod users;

pub use config::AppConfig;
pub use database::{get_database_pool, init_schema, DatabaseManager};
pub use error::{AppError, Result};
pub use handlers::create_routes;
pub use items::{ItemFilter, ItemRepository, ItemRepositoryTrait};
pub use users::{UserRepository, UserRepositoryTrait};

use axum::Router;
use sqlx::SqlitePool;
use std::net::SocketAddr;
use tokio::signal;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub app_name: String,
    pub version: String,
    pub db_manager: DatabaseManager,
    pub items: ItemRepository,
    pub users: UserRepository,
}

impl AppState {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            app_name: "Items Service".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            db_manager: DatabaseManager::new(pool.clone()),
            items: ItemRepository::new(pool.clone()),
            users: UserRepository::new(pool),
        }
    }
}

/// Opens the database described by `config` and creates any missing tables.
pub async fn initialize_state(config: &AppConfig) -> Result<AppState> {
    let pool = get_database_pool(&config.database).await?;
    init_schema(&pool).await?;
    Ok(AppState::new(pool))
}

pub fn create_app(state: AppState) -> Router {
    create_app_with_config(state, &AppConfig::default())
}

pub fn create_app_with_config(state: AppState, config: &AppConfig) -> Router {
    Router::new()
        .merge(create_routes())
        .layer(middleware::cors_layer_from_config(&config.cors))
        .layer(middleware::logging_layer())
        .with_state(state)
}

pub async fn run_server(app: Router, addr: SocketAddr) -> Result<()> {
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.map_err(anyhow::Error::from)?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(anyhow::Error::from)?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        },
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown");
        },
    }
}
