//! Application configuration structs
//!
//! Loads configuration from environment variables (and `.env` when present).

use serde::Deserialize;
use std::env;
use std::fmt;
use std::str::FromStr;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub api: ServerConfig,
    pub storage: StorageBackend,
    pub database: Option<DatabaseConfig>,
    pub jwt: JwtConfig,
    pub admin: AdminConfig,
    pub viewer: ViewerConfig,
    pub rate_limit: RateLimitConfig,
    pub cors: CorsConfig,
    pub log: LogConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

/// Which repository implementation backs the services
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Memory,
    Postgres,
}

impl StorageBackend {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::Postgres => "postgres",
        }
    }
}

impl FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "postgres" | "postgresql" => Ok(Self::Postgres),
            other => Err(ConfigError::InvalidValue("STORAGE_BACKEND", other.to_string())),
        }
    }
}

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

/// JWT configuration
#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    /// Admin session lifetime in seconds
    #[serde(default = "default_session_expiry")]
    pub session_expiry: i64,
}

/// Admin credential source
///
/// `password_hash` (argon2 PHC string) wins over `password`; a plain
/// password is hashed once at startup. With neither set, login is disabled.
#[derive(Clone, Deserialize)]
pub struct AdminConfig {
    #[serde(default = "default_admin_username")]
    pub username: String,
    pub password_hash: Option<String>,
    pub password: Option<String>,
}

impl AdminConfig {
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.password_hash.is_some() || self.password.is_some()
    }
}

impl fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminConfig")
            .field("username", &self.username)
            .field("password_hash", &self.password_hash.as_ref().map(|_| "<redacted>"))
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Anonymous viewer settings
#[derive(Debug, Clone, Deserialize)]
pub struct ViewerConfig {
    /// Viewer id used when a request carries no `x-viewer-id` header
    #[serde(default = "default_viewer_id")]
    pub default_viewer_id: String,
}

/// Rate limiting configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: u32,
    #[serde(default = "default_burst")]
    pub burst: u32,
}

/// CORS configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    pub format: LogFormat,
}

// Default value functions
fn default_app_name() -> String {
    "family-hub".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    5
}

fn default_session_expiry() -> i64 {
    43200 // 12 hours
}

fn default_admin_username() -> String {
    "admin".to_string()
}

fn default_viewer_id() -> String {
    "guest".to_string()
}

fn default_requests_per_second() -> u32 {
    10
}

fn default_burst() -> u32 {
    50
}

fn default_log_format(env: Environment) -> LogFormat {
    if env.is_production() {
        LogFormat::Json
    } else {
        LogFormat::Pretty
    }
}

fn parse_or<T: FromStr>(name: &str, default: impl FnOnce() -> T) -> T {
    env::var(name)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(default)
}

fn non_empty(name: &str) -> Option<String> {
    env::var(name).ok().filter(|s| !s.trim().is_empty())
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing or invalid
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let app_env = env::var("APP_ENV")
            .ok()
            .and_then(|s| match s.to_lowercase().as_str() {
                "production" => Some(Environment::Production),
                "staging" => Some(Environment::Staging),
                "development" => Some(Environment::Development),
                _ => None,
            })
            .unwrap_or_default();

        let storage = match env::var("STORAGE_BACKEND") {
            Ok(value) => value.parse()?,
            Err(_) => StorageBackend::default(),
        };

        let database = non_empty("DATABASE_URL").map(|url| DatabaseConfig {
            url,
            max_connections: parse_or("DATABASE_MAX_CONNECTIONS", default_max_connections),
            min_connections: parse_or("DATABASE_MIN_CONNECTIONS", default_min_connections),
        });
        if storage == StorageBackend::Postgres && database.is_none() {
            return Err(ConfigError::MissingVar("DATABASE_URL"));
        }

        let log_format = match env::var("LOG_FORMAT").ok().as_deref() {
            Some("json") => LogFormat::Json,
            Some("pretty") => LogFormat::Pretty,
            Some(other) => return Err(ConfigError::InvalidValue("LOG_FORMAT", other.to_string())),
            None => default_log_format(app_env),
        };

        Ok(Self {
            app: AppSettings {
                name: env::var("APP_NAME").unwrap_or_else(|_| default_app_name()),
                env: app_env,
            },
            api: ServerConfig {
                host: env::var("API_HOST").unwrap_or_else(|_| default_host()),
                port: parse_or("API_PORT", default_port),
            },
            storage,
            database,
            jwt: JwtConfig {
                secret: non_empty("JWT_SECRET").ok_or(ConfigError::MissingVar("JWT_SECRET"))?,
                session_expiry: parse_or("JWT_SESSION_EXPIRY", default_session_expiry),
            },
            admin: AdminConfig {
                username: env::var("ADMIN_USERNAME").unwrap_or_else(|_| default_admin_username()),
                password_hash: non_empty("ADMIN_PASSWORD_HASH"),
                password: non_empty("ADMIN_PASSWORD"),
            },
            viewer: ViewerConfig {
                default_viewer_id: non_empty("DEFAULT_VIEWER_ID")
                    .unwrap_or_else(default_viewer_id),
            },
            rate_limit: RateLimitConfig {
                requests_per_second: parse_or(
                    "RATE_LIMIT_REQUESTS_PER_SECOND",
                    default_requests_per_second,
                ),
                burst: parse_or("RATE_LIMIT_BURST", default_burst),
            },
            cors: CorsConfig {
                allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                    .ok()
                    .map(|s| {
                        s.split(',')
                            .map(str::trim)
                            .filter(|origin| !origin.is_empty())
                            .map(String::from)
                            .collect()
                    })
                    .unwrap_or_default(),
            },
            log: LogConfig { format: log_format },
        })
    }

    /// In-memory configuration for local runs and tests
    ///
    /// Uses the memory backend, an ephemeral loopback port, and the given
    /// admin password; everything else takes its default.
    #[must_use]
    pub fn local(jwt_secret: &str, admin_password: &str) -> Self {
        Self {
            app: AppSettings {
                name: default_app_name(),
                env: Environment::Development,
            },
            api: ServerConfig {
                host: default_host(),
                port: 0,
            },
            storage: StorageBackend::Memory,
            database: None,
            jwt: JwtConfig {
                secret: jwt_secret.to_string(),
                session_expiry: default_session_expiry(),
            },
            admin: AdminConfig {
                username: default_admin_username(),
                password_hash: None,
                password: Some(admin_password.to_string()),
            },
            viewer: ViewerConfig {
                default_viewer_id: default_viewer_id(),
            },
            rate_limit: RateLimitConfig {
                requests_per_second: 1000,
                burst: 1000,
            },
            cors: CorsConfig {
                allowed_origins: Vec::new(),
            },
            log: LogConfig {
                format: LogFormat::Pretty,
            },
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_is_production() {
        assert!(!Environment::Development.is_production());
        assert!(!Environment::Staging.is_production());
        assert!(Environment::Production.is_production());
    }

    #[test]
    fn test_server_address() {
        let config = ServerConfig {
            host: "0.0.0.0".to_string(),
            port: 8080,
        };
        assert_eq!(config.address(), "0.0.0.0:8080");
    }

    #[test]
    fn test_storage_backend_parse() {
        assert_eq!("memory".parse::<StorageBackend>().unwrap(), StorageBackend::Memory);
        assert_eq!("Postgres".parse::<StorageBackend>().unwrap(), StorageBackend::Postgres);
        assert!(matches!(
            "sqlite".parse::<StorageBackend>(),
            Err(ConfigError::InvalidValue("STORAGE_BACKEND", _))
        ));
    }

    #[test]
    fn test_default_values() {
        assert_eq!(default_app_name(), "family-hub");
        assert_eq!(default_host(), "127.0.0.1");
        assert_eq!(default_port(), 8080);
        assert_eq!(default_viewer_id(), "guest");
        assert_eq!(default_session_expiry(), 43200);
        assert_eq!(default_log_format(Environment::Production), LogFormat::Json);
        assert_eq!(default_log_format(Environment::Development), LogFormat::Pretty);
    }

    #[test]
    fn test_local_config() {
        let config = AppConfig::local("secret", "pw");
        assert_eq!(config.storage, StorageBackend::Memory);
        assert!(config.database.is_none());
        assert!(config.admin.is_configured());
        assert_eq!(config.viewer.default_viewer_id, "guest");
    }

    #[test]
    fn test_admin_debug_redacts_secrets() {
        let admin = AdminConfig {
            username: "admin".to_string(),
            password_hash: None,
            password: Some("hunter2".to_string()),
        };
        let printed = format!("{admin:?}");
        assert!(!printed.contains("hunter2"));
        assert!(printed.contains("<redacted>"));
    }
}
