//! Service context - dependency container for services
//!
//! Holds all repositories and auth dependencies needed by services.

use std::sync::Arc;

use hub_common::{AdminCredentials, JwtService};
use hub_core::traits::{
    CommentRepository, EventRepository, FamilyNodeRepository, FamilyRepository, NewsRepository,
    ReactionRepository,
};
use hub_db::{
    MemoryStore, PgCommentRepository, PgEventRepository, PgFamilyNodeRepository,
    PgFamilyRepository, PgNewsRepository, PgPool, PgReactionRepository,
};

use super::error::{ServiceError, ServiceResult};

/// Viewer id used when the caller does not identify itself
pub const DEFAULT_VIEWER_ID: &str = "guest";

/// Service context containing all dependencies
///
/// This is the main dependency container that gets passed to all services.
/// It provides access to:
/// - Repositories (PostgreSQL or memory, behind the same traits)
/// - JWT service and admin credentials for sessions
/// - The fallback viewer id for reactions
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    family_repo: Arc<dyn FamilyRepository>,
    member_repo: Arc<dyn FamilyNodeRepository>,
    event_repo: Arc<dyn EventRepository>,
    news_repo: Arc<dyn NewsRepository>,
    comment_repo: Arc<dyn CommentRepository>,
    reaction_repo: Arc<dyn ReactionRepository>,

    // Auth
    jwt_service: Arc<JwtService>,
    admin_credentials: Arc<AdminCredentials>,

    default_viewer_id: String,
}

impl ServiceContext {
    // === Repositories ===

    /// Get the family repository
    pub fn family_repo(&self) -> &dyn FamilyRepository {
        self.family_repo.as_ref()
    }

    /// Get the family member repository
    pub fn member_repo(&self) -> &dyn FamilyNodeRepository {
        self.member_repo.as_ref()
    }

    /// Get the event repository
    pub fn event_repo(&self) -> &dyn EventRepository {
        self.event_repo.as_ref()
    }

    /// Get the news repository
    pub fn news_repo(&self) -> &dyn NewsRepository {
        self.news_repo.as_ref()
    }

    /// Get the comment repository
    pub fn comment_repo(&self) -> &dyn CommentRepository {
        self.comment_repo.as_ref()
    }

    /// Get the reaction repository
    pub fn reaction_repo(&self) -> &dyn ReactionRepository {
        self.reaction_repo.as_ref()
    }

    // === Auth ===

    /// Get the JWT service
    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    /// Get the configured admin credentials
    pub fn admin_credentials(&self) -> &AdminCredentials {
        self.admin_credentials.as_ref()
    }

    /// Viewer id applied when a request carries none
    pub fn default_viewer_id(&self) -> &str {
        &self.default_viewer_id
    }

    /// Resolve the effective viewer id, falling back to the configured sentinel
    pub fn viewer_or_default(&self, viewer_id: Option<&str>) -> String {
        viewer_id
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or(&self.default_viewer_id)
            .to_string()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("admin_credentials", &self.admin_credentials)
            .field("default_viewer_id", &self.default_viewer_id)
            .finish_non_exhaustive()
    }
}

/// Builder for creating ServiceContext with custom configuration
pub struct ServiceContextBuilder {
    family_repo: Option<Arc<dyn FamilyRepository>>,
    member_repo: Option<Arc<dyn FamilyNodeRepository>>,
    event_repo: Option<Arc<dyn EventRepository>>,
    news_repo: Option<Arc<dyn NewsRepository>>,
    comment_repo: Option<Arc<dyn CommentRepository>>,
    reaction_repo: Option<Arc<dyn ReactionRepository>>,
    jwt_service: Option<Arc<JwtService>>,
    admin_credentials: Option<Arc<AdminCredentials>>,
    default_viewer_id: Option<String>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self {
            family_repo: None,
            member_repo: None,
            event_repo: None,
            news_repo: None,
            comment_repo: None,
            reaction_repo: None,
            jwt_service: None,
            admin_credentials: None,
            default_viewer_id: None,
        }
    }

    /// Wire every repository to one shared in-memory store
    pub fn memory_store(self, store: Arc<MemoryStore>) -> Self {
        self.family_repo(store.clone())
            .member_repo(store.clone())
            .event_repo(store.clone())
            .news_repo(store.clone())
            .comment_repo(store.clone())
            .reaction_repo(store)
    }

    /// Wire every repository to PostgreSQL
    pub fn postgres(self, pool: PgPool) -> Self {
        self.family_repo(Arc::new(PgFamilyRepository::new(pool.clone())))
            .member_repo(Arc::new(PgFamilyNodeRepository::new(pool.clone())))
            .event_repo(Arc::new(PgEventRepository::new(pool.clone())))
            .news_repo(Arc::new(PgNewsRepository::new(pool.clone())))
            .comment_repo(Arc::new(PgCommentRepository::new(pool.clone())))
            .reaction_repo(Arc::new(PgReactionRepository::new(pool)))
    }

    pub fn family_repo(mut self, repo: Arc<dyn FamilyRepository>) -> Self {
        self.family_repo = Some(repo);
        self
    }

    pub fn member_repo(mut self, repo: Arc<dyn FamilyNodeRepository>) -> Self {
        self.member_repo = Some(repo);
        self
    }

    pub fn event_repo(mut self, repo: Arc<dyn EventRepository>) -> Self {
        self.event_repo = Some(repo);
        self
    }

    pub fn news_repo(mut self, repo: Arc<dyn NewsRepository>) -> Self {
        self.news_repo = Some(repo);
        self
    }

    pub fn comment_repo(mut self, repo: Arc<dyn CommentRepository>) -> Self {
        self.comment_repo = Some(repo);
        self
    }

    pub fn reaction_repo(mut self, repo: Arc<dyn ReactionRepository>) -> Self {
        self.reaction_repo = Some(repo);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    pub fn admin_credentials(mut self, credentials: Arc<AdminCredentials>) -> Self {
        self.admin_credentials = Some(credentials);
        self
    }

    pub fn default_viewer_id(mut self, viewer_id: impl Into<String>) -> Self {
        self.default_viewer_id = Some(viewer_id.into());
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext {
            family_repo: self.family_repo.ok_or_else(|| ServiceError::validation("family_repo is required"))?,
            member_repo: self.member_repo.ok_or_else(|| ServiceError::validation("member_repo is required"))?,
            event_repo: self.event_repo.ok_or_else(|| ServiceError::validation("event_repo is required"))?,
            news_repo: self.news_repo.ok_or_else(|| ServiceError::validation("news_repo is required"))?,
            comment_repo: self.comment_repo.ok_or_else(|| ServiceError::validation("comment_repo is required"))?,
            reaction_repo: self.reaction_repo.ok_or_else(|| ServiceError::validation("reaction_repo is required"))?,
            jwt_service: self.jwt_service.ok_or_else(|| ServiceError::validation("jwt_service is required"))?,
            admin_credentials: self.admin_credentials.ok_or_else(|| ServiceError::validation("admin_credentials is required"))?,
            default_viewer_id: self
                .default_viewer_id
                .unwrap_or_else(|| DEFAULT_VIEWER_ID.to_string()),
        })
    }
}

impl Default for ServiceContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Context over a fresh memory store, shared by the service tests
#[cfg(test)]
pub(crate) fn test_context() -> ServiceContext {
    context_with_admin(None)
}

/// Same as [`test_context`] with an admin password configured
#[cfg(test)]
pub(crate) fn test_context_with_admin(password: &str) -> ServiceContext {
    context_with_admin(Some(password.to_string()))
}

#[cfg(test)]
fn context_with_admin(password: Option<String>) -> ServiceContext {
    use hub_common::AdminConfig;

    let admin = AdminConfig {
        username: "admin".to_string(),
        password_hash: None,
        password,
    };

    ServiceContextBuilder::new()
        .memory_store(MemoryStore::shared())
        .jwt_service(Arc::new(JwtService::new("test-secret", 3600)))
        .admin_credentials(Arc::new(AdminCredentials::from_config(&admin).unwrap()))
        .build()
        .unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_dependency_is_reported() {
        let err = ServiceContextBuilder::new()
            .memory_store(MemoryStore::shared())
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("jwt_service"));
    }

    #[test]
    fn test_viewer_fallback() {
        let ctx = test_context();
        assert_eq!(ctx.default_viewer_id(), DEFAULT_VIEWER_ID);
        assert_eq!(ctx.viewer_or_default(None), "guest");
        assert_eq!(ctx.viewer_or_default(Some("  ")), "guest");
        assert_eq!(ctx.viewer_or_default(Some("grandma")), "grandma");
    }
}
