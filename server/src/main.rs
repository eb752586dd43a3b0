mod api;
mod config;
mod db;
mod models;
mod pages;
mod routes;
mod schema;
mod store;
mod telemetry;
#[cfg(test)]
mod test_util;

use config::{Config, ConfigError, StoreBackend};
use db::DbSetupError;
use std::env;
use std::process::ExitCode;
use std::sync::Arc;
use store::{MemoryRecipeStore, PgRecipeStore, RecipeStore};
use thiserror::Error;

/// Application state shared across all handlers
pub type AppState = Arc<dyn RecipeStore>;

#[derive(Debug, Error)]
enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Database(#[from] DbSetupError),

    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: std::net::SocketAddr,
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Serve(std::io::Error),
}

#[tokio::main]
async fn main() -> ExitCode {
    // Check for --openapi flag to dump spec and exit
    if env::args().any(|arg| arg == "--openapi") {
        return match api::openapi().to_pretty_json() {
            Ok(spec) => {
                println!("{}", spec);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Failed to render OpenAPI spec: {}", e);
                ExitCode::FAILURE
            }
        };
    }

    telemetry::init_telemetry();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), StartupError> {
    let config = Config::from_env()?;

    let state: AppState = match &config.store {
        StoreBackend::Postgres { database_url } => {
            Arc::new(PgRecipeStore::new(db::create_pool(database_url)?))
        }
        StoreBackend::Memory => Arc::new(MemoryRecipeStore::new()),
    };
    tracing::info!("Using {} recipe store", state.backend_name());

    let app = routes::build_app(state, &config);

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| StartupError::Bind { addr, source })?;

    tracing::info!("Server listening on {}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", addr);

    axum::serve(listener, app).await.map_err(StartupError::Serve)
}
