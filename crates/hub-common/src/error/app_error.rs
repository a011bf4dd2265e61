//! Application error types
//!
//! Errors raised by auth, configuration and infrastructure setup.

/// Application-wide error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Authentication errors
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    #[error("Admin session required")]
    AdminRequired,

    // Database errors
    #[error("Database error: {0}")]
    Database(String),

    // Internal errors
    #[error("Internal server error")]
    Internal(#[source] anyhow::Error),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Get HTTP status code for this error
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            // 401 Unauthorized
            Self::InvalidCredentials | Self::InvalidToken | Self::TokenExpired => 401,

            // 403 Forbidden
            Self::AdminRequired => 403,

            // 500 Internal Server Error
            Self::Database(_) | Self::Internal(_) | Self::Config(_) => 500,
        }
    }

    /// Get error code for API responses
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::TokenExpired => "TOKEN_EXPIRED",
            Self::AdminRequired => "ADMIN_REQUIRED",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::InvalidCredentials.status_code(), 401);
        assert_eq!(AppError::TokenExpired.status_code(), 401);
        assert_eq!(AppError::AdminRequired.status_code(), 403);
        assert_eq!(AppError::Database("test".to_string()).status_code(), 500);
        assert_eq!(AppError::Config("test".to_string()).status_code(), 500);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(AppError::InvalidToken.error_code(), "INVALID_TOKEN");
        assert_eq!(AppError::AdminRequired.error_code(), "ADMIN_REQUIRED");
        assert_eq!(
            AppError::Internal(anyhow::anyhow!("boom")).error_code(),
            "INTERNAL_ERROR"
        );
    }

    #[test]
    fn test_internal_hides_source_message() {
        let err = AppError::Internal(anyhow::anyhow!("Password hashing failed"));
        assert_eq!(err.to_string(), "Internal server error");
    }
}
