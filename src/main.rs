mod app_state;
mod config;
mod database;
mod handlers;
mod models;
mod repositories;
mod routes;
mod services;

use std::process;
use std::sync::Arc;

use config::{AppConfig, StorageBackend};
use database::init::init_db;
use log::{error, info, warn};
use repositories::{
    memory_repository::InMemoryMessageStore,
    message_repository::{MessageStore, PgMessageStore},
};
use routes::app_routes::create_router;
use tokio::signal;

#[tokio::main]
async fn main() {
    env_logger::init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            process::exit(1);
        }
    };

    let store: Arc<dyn MessageStore> = match &config.storage {
        StorageBackend::Postgres { database_url } => match init_db(database_url).await {
            Ok(pool) => Arc::new(PgMessageStore::new(pool)),
            Err(e) => {
                error!("Error initializing the database: {}", e);
                process::exit(1);
            }
        },
        StorageBackend::Memory => {
            warn!("Using in-memory storage; messages are lost on exit");
            Arc::new(InMemoryMessageStore::new())
        }
    };

    let app = create_router(store);

    let server = match axum::Server::try_bind(&config.bind_addr) {
        Ok(builder) => builder.serve(app.into_make_service()),
        Err(e) => {
            error!("Failed to bind {}: {}", config.bind_addr, e);
            process::exit(1);
        }
    };
    info!("Server running on http://{}", config.bind_addr);

    if let Err(e) = server.with_graceful_shutdown(shutdown_signal()).await {
        error!("Server error: {}", e);
        process::exit(1);
    }
}

// Resolves on Ctrl+C or, on unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
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
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Signal received, starting graceful shutdown");
}
