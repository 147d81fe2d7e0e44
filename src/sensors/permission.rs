//! Runtime location permission gate

use crate::hardware::PermissionProvider;
use tracing::debug;

/// Requests and queries fine-location permission
///
/// On platforms without a runtime permission model `check` does nothing and
/// `is_authorized` always holds.
#[derive(Debug, Clone, Copy, Default)]
pub struct PermissionGate;

impl PermissionGate {
    pub fn new() -> Self {
        PermissionGate
    }

    /// Ask for fine-location permission where the platform needs it.
    /// The grant may land later; `is_authorized` can still be false right after.
    pub fn check<P: PermissionProvider + ?Sized>(&self, platform: &mut P) {
        if platform.requires_runtime_permission() {
            debug!("requesting fine location permission");
            platform.request_fine_location();
        }
    }

    /// Current grant state. Never blocks.
    pub fn is_authorized<P: PermissionProvider + ?Sized>(&self, platform: &P) -> bool {
        !platform.requires_runtime_permission() || platform.has_fine_location()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hardware::{MockPlatform, PermissionBehavior};

    #[test]
    fn test_check_requests_when_required() {
        let gate = PermissionGate::new();
        let mut platform = MockPlatform::new().with_permission(PermissionBehavior::Denied);

        assert!(!gate.is_authorized(&platform));
        gate.check(&mut platform);
        assert_eq!(platform.permission_requests(), 1);
        assert!(!gate.is_authorized(&platform));
    }

    #[test]
    fn test_check_is_noop_without_runtime_permission() {
        let gate = PermissionGate::new();
        let mut platform = MockPlatform::new()
            .with_permission(PermissionBehavior::Denied)
            .without_runtime_permission();

        gate.check(&mut platform);
        assert_eq!(platform.permission_requests(), 0);
        assert!(gate.is_authorized(&platform));
    }

    #[test]
    fn test_grant_can_lag_behind_request() {
        let gate = PermissionGate::new();
        let mut platform = MockPlatform::new().with_permission(PermissionBehavior::GrantAfterChecks(1));

        gate.check(&mut platform);
        assert!(!gate.is_authorized(&platform));
        assert!(gate.is_authorized(&platform));
    }
}
