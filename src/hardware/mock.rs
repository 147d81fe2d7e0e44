//! Scripted platform for testing and development

use crate::core::{Position, ServiceStatus};
use crate::hardware::{CompassProvider, GyroProvider, LocationProvider, PermissionProvider};
use nalgebra::{UnitQuaternion, Vector3};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

/// How the mock answers permission queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionBehavior {
    /// Already granted before anything asks
    Granted,
    /// Granted as soon as a request is issued
    GrantOnRequest,
    /// Granted once a request was issued and this many later queries returned false
    GrantAfterChecks(u32),
    /// Never granted
    Denied,
}

/// Mock platform with scripted status and gyroscope samples
///
/// Status and angular-rate scripts are consumed one entry per read; the last
/// entry stays current once the script runs out.
#[derive(Debug)]
pub struct MockPlatform {
    requires_permission: bool,
    permission: PermissionBehavior,
    permission_requests: u32,
    denied_checks: Cell<u32>,
    started: bool,
    start_commands: u32,
    status_script: RefCell<VecDeque<ServiceStatus>>,
    status: Cell<ServiceStatus>,
    status_polls: Cell<u32>,
    enabled_by_user: bool,
    fix: Position,
    compass_enabled: bool,
    magnetic_heading: f32,
    true_heading: f32,
    gyro_enabled: bool,
    attitude: UnitQuaternion<f32>,
    rate_script: RefCell<VecDeque<Vector3<f32>>>,
    rotation_rate: Cell<Vector3<f32>>,
}

impl MockPlatform {
    /// Create a mock that needs runtime permission, has it already, and
    /// reports `Running` right after start
    pub fn new() -> Self {
        Self {
            requires_permission: true,
            permission: PermissionBehavior::Granted,
            permission_requests: 0,
            denied_checks: Cell::new(0),
            started: false,
            start_commands: 0,
            status_script: RefCell::new(VecDeque::from([ServiceStatus::Running])),
            status: Cell::new(ServiceStatus::Stopped),
            status_polls: Cell::new(0),
            enabled_by_user: true,
            fix: Position::default(),
            compass_enabled: false,
            magnetic_heading: 0.0,
            true_heading: 0.0,
            gyro_enabled: false,
            attitude: UnitQuaternion::identity(),
            rate_script: RefCell::new(VecDeque::new()),
            rotation_rate: Cell::new(Vector3::zeros()),
        }
    }

    pub fn with_permission(mut self, behavior: PermissionBehavior) -> Self {
        self.permission = behavior;
        self
    }

    /// Platforms without a runtime permission model never see a request
    pub fn without_runtime_permission(mut self) -> Self {
        self.requires_permission = false;
        self
    }

    /// Statuses reported after `start`, one per `status()` call
    pub fn with_status_script<I: IntoIterator<Item = ServiceStatus>>(mut self, script: I) -> Self {
        self.status_script = RefCell::new(script.into_iter().collect());
        self
    }

    pub fn with_fix(mut self, fix: Position) -> Self {
        self.fix = fix;
        self
    }

    pub fn with_headings(mut self, magnetic: f32, true_north: f32) -> Self {
        self.magnetic_heading = magnetic;
        self.true_heading = true_north;
        self
    }

    pub fn with_attitude(mut self, attitude: UnitQuaternion<f32>) -> Self {
        self.attitude = attitude;
        self
    }

    /// Angular-rate samples, one per `rotation_rate()` call
    pub fn with_rate_script<I: IntoIterator<Item = Vector3<f32>>>(mut self, script: I) -> Self {
        self.rate_script = RefCell::new(script.into_iter().collect());
        self
    }

    pub fn set_enabled_by_user(&mut self, enabled: bool) {
        self.enabled_by_user = enabled;
    }

    pub fn set_fix(&mut self, fix: Position) {
        self.fix = fix;
    }

    /// Simulate the user accepting the permission dialog
    pub fn grant_permission(&mut self) {
        self.permission = PermissionBehavior::Granted;
    }

    pub fn permission_requests(&self) -> u32 {
        self.permission_requests
    }

    pub fn start_commands(&self) -> u32 {
        self.start_commands
    }

    pub fn status_polls(&self) -> u32 {
        self.status_polls.get()
    }

    pub fn push_rotation_rate(&mut self, rate: Vector3<f32>) {
        self.rate_script.borrow_mut().push_back(rate);
    }
}

impl Default for MockPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl PermissionProvider for MockPlatform {
    fn requires_runtime_permission(&self) -> bool {
        self.requires_permission
    }

    fn request_fine_location(&mut self) {
        self.permission_requests += 1;
        if self.permission == PermissionBehavior::GrantOnRequest {
            self.permission = PermissionBehavior::Granted;
        }
    }

    fn has_fine_location(&self) -> bool {
        match self.permission {
            PermissionBehavior::Granted => true,
            PermissionBehavior::GrantOnRequest | PermissionBehavior::Denied => false,
            PermissionBehavior::GrantAfterChecks(checks) => {
                if self.permission_requests == 0 {
                    return false;
                }
                let seen = self.denied_checks.get();
                if seen >= checks {
                    true
                } else {
                    self.denied_checks.set(seen + 1);
                    false
                }
            }
        }
    }
}

impl LocationProvider for MockPlatform {
    fn start(&mut self) {
        self.started = true;
        self.start_commands += 1;
    }

    fn status(&self) -> ServiceStatus {
        self.status_polls.set(self.status_polls.get() + 1);
        if !self.started {
            return ServiceStatus::Stopped;
        }
        if let Some(next) = self.status_script.borrow_mut().pop_front() {
            self.status.set(next);
        }
        self.status.get()
    }

    fn is_enabled_by_user(&self) -> bool {
        self.enabled_by_user
    }

    fn last_fix(&self) -> Position {
        self.fix
    }
}

impl CompassProvider for MockPlatform {
    fn set_compass_enabled(&mut self, enabled: bool) {
        self.compass_enabled = enabled;
    }

    fn is_compass_enabled(&self) -> bool {
        self.compass_enabled
    }

    fn magnetic_heading(&self) -> f32 {
        self.magnetic_heading
    }

    fn true_heading(&self) -> f32 {
        self.true_heading
    }
}

impl GyroProvider for MockPlatform {
    fn set_gyro_enabled(&mut self, enabled: bool) {
        self.gyro_enabled = enabled;
    }

    fn is_gyro_enabled(&self) -> bool {
        self.gyro_enabled
    }

    fn attitude(&self) -> UnitQuaternion<f32> {
        self.attitude
    }

    fn rotation_rate(&self) -> Vector3<f32> {
        if let Some(next) = self.rate_script.borrow_mut().pop_front() {
            self.rotation_rate.set(next);
        }
        self.rotation_rate.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_platform_creation() {
        let platform = MockPlatform::new();
        assert!(platform.requires_runtime_permission());
        assert!(platform.has_fine_location());
        assert_eq!(platform.start_commands(), 0);
        assert!(!platform.is_compass_enabled());
        assert!(!platform.is_gyro_enabled());
    }

    #[test]
    fn test_status_script() {
        let mut platform = MockPlatform::new().with_status_script([
            ServiceStatus::Initializing,
            ServiceStatus::Running,
        ]);

        // Nothing is consumed before the start command
        assert_eq!(platform.status(), ServiceStatus::Stopped);

        platform.start();
        assert_eq!(platform.status(), ServiceStatus::Initializing);
        assert_eq!(platform.status(), ServiceStatus::Running);
        // Last entry is sticky
        assert_eq!(platform.status(), ServiceStatus::Running);
        assert_eq!(platform.status_polls(), 4);
    }

    #[test]
    fn test_permission_behaviors() {
        let mut platform = MockPlatform::new().with_permission(PermissionBehavior::GrantOnRequest);
        assert!(!platform.has_fine_location());
        platform.request_fine_location();
        assert!(platform.has_fine_location());

        let mut platform = MockPlatform::new().with_permission(PermissionBehavior::GrantAfterChecks(2));
        assert!(!platform.has_fine_location());
        platform.request_fine_location();
        assert!(!platform.has_fine_location());
        assert!(!platform.has_fine_location());
        assert!(platform.has_fine_location());

        let mut platform = MockPlatform::new().with_permission(PermissionBehavior::Denied);
        platform.request_fine_location();
        assert!(!platform.has_fine_location());
        platform.grant_permission();
        assert!(platform.has_fine_location());
        assert_eq!(platform.permission_requests(), 1);
    }

    #[test]
    fn test_rate_script() {
        let mut platform = MockPlatform::new()
            .with_rate_script([Vector3::new(1.0, 0.0, 0.0), Vector3::new(0.0, 2.0, 0.0)]);
        assert_eq!(platform.rotation_rate(), Vector3::new(1.0, 0.0, 0.0));
        assert_eq!(platform.rotation_rate(), Vector3::new(0.0, 2.0, 0.0));
        assert_eq!(platform.rotation_rate(), Vector3::new(0.0, 2.0, 0.0));

        platform.push_rotation_rate(Vector3::zeros());
        assert_eq!(platform.rotation_rate(), Vector3::zeros());
    }
}
