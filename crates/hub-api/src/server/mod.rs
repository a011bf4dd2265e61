//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use hub_common::{AdminCredentials, AppConfig, AppError, JwtService, StorageBackend};
use hub_db::{create_pool, ensure_schema, MemoryStore, PgPool};
use hub_service::ServiceContextBuilder;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::middleware::{apply_middleware, apply_rate_limit};
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
///
/// Health routes sit outside the rate limiter.
pub fn create_app(state: AppState) -> Router {
    let config = state.config();
    let api = apply_rate_limit(create_router(), &config.rate_limit);
    let router = api.merge(health_routes());
    let router = apply_middleware(router, &config.cors, config.app.env.is_production());
    router.with_state(state)
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    let jwt_service = Arc::new(JwtService::new(
        &config.jwt.secret,
        config.jwt.session_expiry,
    ));

    let admin_credentials = Arc::new(AdminCredentials::from_config(&config.admin)?);
    if !admin_credentials.is_enabled() {
        warn!("No admin password configured; admin login is disabled");
    }

    let builder = ServiceContextBuilder::new()
        .jwt_service(jwt_service)
        .admin_credentials(admin_credentials)
        .default_viewer_id(config.viewer.default_viewer_id.clone());

    let (builder, pool) = match config.storage {
        StorageBackend::Memory => {
            info!("Using in-memory storage");
            (builder.memory_store(MemoryStore::shared()), None)
        }
        StorageBackend::Postgres => {
            let pool = connect_postgres(&config).await?;
            (builder.postgres(pool.clone()), Some(pool))
        }
    };

    let service_context = builder
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, config, pool))
}

async fn connect_postgres(config: &AppConfig) -> Result<PgPool, AppError> {
    let database = config
        .database
        .as_ref()
        .ok_or_else(|| AppError::Config("DATABASE_URL is required for postgres storage".into()))?;

    info!("Connecting to PostgreSQL...");
    let pool = create_pool(&hub_db::DatabaseConfig::from(database))
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    ensure_schema(&pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    Ok(pool)
}

/// Bind the listener for the configured host and port
pub async fn bind(config: &AppConfig) -> Result<TcpListener, AppError> {
    let addr = format!("{}:{}", config.api.host, config.api.port);
    TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))
}

/// Serve the application on an already bound listener
pub async fn run_server(app: Router, listener: TcpListener) -> Result<(), AppError> {
    let addr: SocketAddr = listener
        .local_addr()
        .map_err(|e| AppError::Config(format!("Listener has no local address: {e}")))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    info!("Server stopped");
    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let listener = bind(&config).await?;
    let state = create_app_state(config).await?;
    let app = create_app(state);
    run_server(app, listener).await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
