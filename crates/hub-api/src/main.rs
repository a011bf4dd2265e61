//! Family hub API server entry point
//!
//! Run with:
//! ```bash
//! cargo run -p hub-api
//! ```
//!
//! Configuration is loaded from environment variables (and `.env`).

use hub_common::{try_init_tracing_with_config, AppConfig, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = try_init_tracing_with_config(&TracingConfig::for_app(&config)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    info!(
        env = ?config.app.env,
        storage = config.storage.as_str(),
        port = config.api.port,
        "Starting family hub API server"
    );

    if let Err(e) = hub_api::run(config).await {
        error!(error = %e, "Server failed");
        std::process::exit(1);
    }
}
