//! Store selection and the serve loop.

use crate::{MediaQrConfig, RouteState, StorageBackend, create_routes};
use mediaqr_error::{MediaQrResult, ServerError, ServerErrorKind};
use mediaqr_service::MediaService;
use mediaqr_storage::{MediaStore, MemoryStore};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

/// Open the configured record store.
///
/// # Errors
///
/// Returns an error if PostgreSQL is selected but unreachable, or if this
/// binary was built without the `postgres` feature.
pub async fn open_store(config: &MediaQrConfig) -> MediaQrResult<Arc<dyn MediaStore>> {
    match config.backend() {
        StorageBackend::Memory => {
            warn!("Using the in-memory store; uploads are lost on restart");
            Ok(Arc::new(MemoryStore::new()))
        }
        StorageBackend::Postgres => open_postgres(config).await,
    }
}

#[cfg(feature = "postgres")]
async fn open_postgres(config: &MediaQrConfig) -> MediaQrResult<Arc<dyn MediaStore>> {
    use mediaqr_error::{ConfigError, StorageError, StorageErrorKind};
    use mediaqr_storage::PostgresMediaStore;

    let database_url = config
        .database_url()
        .clone()
        .ok_or_else(|| ConfigError::invalid("database_url", "required for the postgres backend"))?;
    let pool_size = *config.database_pool_size();

    let store = tokio::task::spawn_blocking(move || {
        PostgresMediaStore::connect(&database_url, pool_size)
    })
    .await
    .map_err(|e| StorageError::new(StorageErrorKind::Task(e.to_string())))??;
    Ok(Arc::new(store))
}

#[cfg(not(feature = "postgres"))]
async fn open_postgres(_config: &MediaQrConfig) -> MediaQrResult<Arc<dyn MediaStore>> {
    Err(mediaqr_error::ConfigError::invalid(
        "backend",
        "this build does not include the postgres feature",
    )
    .into())
}

/// Open the store, bind, and serve until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the store cannot be opened, the address cannot be
/// bound, or the server fails.
pub async fn run(config: MediaQrConfig) -> MediaQrResult<()> {
    let store = open_store(&config).await?;
    let service = MediaService::new(store, config.service_settings());
    let bind_address = config.bind_address().clone();
    let app = create_routes(RouteState::new(service, Arc::new(config)));

    let listener = TcpListener::bind(&bind_address)
        .await
        .map_err(|e| ServerError::new(ServerErrorKind::Bind(format!("{}: {}", bind_address, e))))?;
    info!(%bind_address, "mediaqr listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ServerError::new(ServerErrorKind::Serve(e.to_string())))?;

    info!("mediaqr stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
