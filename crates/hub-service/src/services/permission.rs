//! Role checks for mutating operations

use hub_common::Role;
use tracing::warn;

use super::error::{ServiceError, ServiceResult};

/// Require an admin session for `action`
///
/// # Errors
/// Returns `ServiceError::AdminRequired` for guests
pub fn require_admin(role: Role, action: &'static str) -> ServiceResult<()> {
    if role.is_admin() {
        Ok(())
    } else {
        warn!(action, "Guest attempted an admin operation");
        Err(ServiceError::admin_required(action))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guest_is_rejected() {
        let err = require_admin(Role::Guest, "delete families").unwrap_err();
        assert_eq!(err.status_code(), 403);
        assert!(require_admin(Role::Admin, "delete families").is_ok());
    }
}
