//! # hub-common
//!
//! Shared utilities including configuration, error handling, authentication, and telemetry.

pub mod auth;
pub mod config;
pub mod error;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use auth::{
    hash_password, verify_password, AdminCredentials, Claims, JwtService, Role, SessionToken,
};
pub use config::{
    AdminConfig, AppConfig, AppSettings, ConfigError, CorsConfig, DatabaseConfig, Environment,
    JwtConfig, LogConfig, LogFormat, RateLimitConfig, ServerConfig, StorageBackend, ViewerConfig,
};
pub use error::AppError;
pub use telemetry::{try_init_tracing, try_init_tracing_with_config, TracingConfig, TracingError};
