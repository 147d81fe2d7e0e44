//! Hardware abstraction layer for platform sensors
//!
//! This module exposes the permission, location, compass and gyroscope
//! collaborators as traits, plus a scripted mock implementation.

pub mod platform;
pub mod mock;

pub use platform::{CompassProvider, GyroProvider, LocationProvider, PermissionProvider, SensorPlatform};
pub use mock::{MockPlatform, PermissionBehavior};
