//! Authentication service
//!
//! Handles admin login and reports the session a request acts under.

use hub_common::{AppError, Claims, Role};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::dto::{LoginRequest, SessionInfoResponse, SessionResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Login with the admin username and password
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<SessionResponse> {
        let credentials = self.ctx.admin_credentials();
        if !credentials.is_enabled() {
            warn!("Login attempted but no admin password is configured");
            return Err(ServiceError::App(AppError::InvalidCredentials));
        }

        if let Err(e) = credentials.verify(&request.username, &request.password) {
            warn!(username = %request.username, "Login failed: invalid credentials");
            return Err(e.into());
        }

        let session_id = Uuid::new_v4().to_string();
        let token = self
            .ctx
            .jwt_service()
            .issue_session(credentials.username(), Role::Admin, Some(session_id.clone()))?;

        info!(session_id = %session_id, "Admin logged in");

        Ok(SessionResponse {
            access_token: token.access_token,
            token_type: token.token_type,
            expires_in: token.expires_in,
            role: token.role,
        })
    }

    /// Describe the session of the current request
    pub fn session(&self, claims: Option<&Claims>, viewer_id: Option<&str>) -> SessionInfoResponse {
        SessionInfoResponse {
            role: claims.map_or(Role::Guest, |c| c.role),
            subject: claims.map(|c| c.sub.clone()),
            viewer_id: self.ctx.viewer_or_default(viewer_id),
        }
    }
}
