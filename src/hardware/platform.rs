//! Platform collaborator traits
//!
//! The operating system owns the permission dialog, the location service and
//! the compass/gyroscope drivers. These traits are the only surface the facade
//! reads them through, so a real backend and the scripted mock are
//! interchangeable.

use crate::core::{Position, ServiceStatus};
use nalgebra::{UnitQuaternion, Vector3};

/// Runtime location permission subsystem
pub trait PermissionProvider {
    /// Whether this platform needs an explicit runtime grant at all
    fn requires_runtime_permission(&self) -> bool;

    /// Ask the user for fine-grained location access.
    /// The answer may arrive asynchronously; `has_fine_location` can stay
    /// false immediately afterwards.
    fn request_fine_location(&mut self);

    /// Current grant state, never blocks
    fn has_fine_location(&self) -> bool;
}

/// Platform location service
pub trait LocationProvider {
    /// Issue the hardware start command
    fn start(&mut self);

    /// Current service status
    fn status(&self) -> ServiceStatus;

    /// Whether the user has location enabled in system settings
    fn is_enabled_by_user(&self) -> bool;

    /// Most recent fix; zeroed until the service is running
    fn last_fix(&self) -> Position;
}

/// Platform compass
pub trait CompassProvider {
    fn set_compass_enabled(&mut self, enabled: bool);
    fn is_compass_enabled(&self) -> bool;
    /// Heading relative to magnetic north, degrees
    fn magnetic_heading(&self) -> f32;
    /// Heading relative to geographic north, degrees
    fn true_heading(&self) -> f32;
}

/// Platform gyroscope
pub trait GyroProvider {
    fn set_gyro_enabled(&mut self, enabled: bool);
    fn is_gyro_enabled(&self) -> bool;
    /// Device attitude
    fn attitude(&self) -> UnitQuaternion<f32>;
    /// Angular rate, radians per second per axis
    fn rotation_rate(&self) -> Vector3<f32>;
}

/// Everything the facade needs from the platform
pub trait SensorPlatform: PermissionProvider + LocationProvider + CompassProvider + GyroProvider {}

impl<T> SensorPlatform for T where T: PermissionProvider + LocationProvider + CompassProvider + GyroProvider {}
