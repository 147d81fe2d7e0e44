//! Sensor Facade
//!
//! A permission-aware facade over platform geolocation, compass and
//! gyroscope, with a bounded location-service startup sequence and
//! flat-earth distance helpers.

pub mod core;
pub mod hardware;
pub mod sensors;
pub mod api;
pub mod utils;

// Re-export commonly used types
pub use crate::core::{HeadingMode, Position, ServiceStatus, METERS_PER_DEGREE, MOVEMENT_THRESHOLD};
pub use crate::hardware::{
    CompassProvider, GyroProvider, LocationProvider, MockPlatform, PermissionBehavior, PermissionProvider,
    SensorPlatform,
};
pub use crate::sensors::{
    GeoPosition, HeadingSensor, LocationServiceController, MotionSensor, PermissionGate, SensorError, SensorResult,
    StartOutcome, StartReport, StartupEvent, StartupPoll, StartupTask, WaitFor,
};
pub use crate::api::{CallbackHandle, JsonFormatter, SensorManager, SensorSnapshot, StartupCallback, TextFormatter};
pub use crate::utils::{Clock, ConfigError, ConfigResult, ConfigurationManager, ManualClock, SensorConfig, SystemClock};
