//! Per-instance sensor context
//!
//! `SensorManager` owns one platform together with the heading mode, the
//! motion baseline and any startup in flight. Independent managers never
//! share state, and a manager is driven by a single owner through `&mut self`.

use crate::api::callback::{CallbackHandle, StartupCallback};
use crate::core::{HeadingMode, Position};
use crate::hardware::SensorPlatform;
use crate::sensors::{
    GeoPosition, HeadingSensor, LocationServiceController, MotionSensor, PermissionGate, SensorResult,
    StartReport, StartupTask,
};
use crate::utils::config::{validate_config, ConfigResult, SensorConfig};
use nalgebra::{UnitQuaternion, Vector2, Vector3};

/// Sensor facade over one platform instance
pub struct SensorManager<P: SensorPlatform> {
    pub(crate) platform: P,
    pub(crate) config: SensorConfig,
    pub(crate) gate: PermissionGate,
    pub(crate) controller: LocationServiceController,
    pub(crate) geo: GeoPosition,
    pub(crate) heading: HeadingSensor,
    pub(crate) motion: MotionSensor,
    pub(crate) startup: Option<StartupTask>,
    pub(crate) last_report: Option<StartReport>,
    pub(crate) callbacks: Vec<(CallbackHandle, StartupCallback)>,
    pub(crate) callback_counter: u32,
}

impl<P: SensorPlatform> SensorManager<P> {
    /// Create a manager with default configuration
    pub fn new(platform: P) -> Self {
        Self::build(platform, SensorConfig::default())
    }

    /// Create a manager with a validated configuration
    pub fn with_config(platform: P, config: SensorConfig) -> ConfigResult<Self> {
        validate_config(&config)?;
        Ok(Self::build(platform, config))
    }

    fn build(platform: P, config: SensorConfig) -> Self {
        Self {
            platform,
            gate: PermissionGate::new(),
            controller: LocationServiceController::new().with_permission_wait_limit(config.permission_wait_limit),
            geo: GeoPosition::new(config.meters_per_degree),
            heading: HeadingSensor::new(config.heading_mode),
            motion: MotionSensor::new(config.movement_threshold),
            startup: None,
            last_report: None,
            callbacks: Vec::new(),
            callback_counter: 0,
            config,
        }
    }

    pub fn config(&self) -> &SensorConfig {
        &self.config
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }

    pub fn into_platform(self) -> P {
        self.platform
    }

    // Permission

    /// Request location permission where the platform needs it
    pub fn check_permission(&mut self) {
        self.gate.check(&mut self.platform);
    }

    pub fn is_authorized(&self) -> bool {
        self.gate.is_authorized(&self.platform)
    }

    // Location service

    /// True iff the user has location enabled and the service is running
    pub fn is_service_healthy(&self) -> bool {
        self.controller.is_service_healthy(&self.platform)
    }

    /// Report of the most recent finished startup, if any
    pub fn last_start_report(&self) -> Option<&StartReport> {
        self.last_report.as_ref()
    }

    /// Whether heading and motion reads have been enabled by a successful start
    pub fn sensors_enabled(&self) -> bool {
        self.heading.is_enabled(&self.platform) && self.motion.is_enabled(&self.platform)
    }

    // Position

    pub fn latitude(&self) -> f64 {
        self.geo.latitude(&self.platform)
    }

    pub fn longitude(&self) -> f64 {
        self.geo.longitude(&self.platform)
    }

    pub fn altitude(&self) -> f64 {
        self.geo.altitude(&self.platform)
    }

    /// (longitude, latitude)
    pub fn position2d(&self) -> Vector2<f64> {
        self.geo.position2d(&self.platform)
    }

    /// (longitude, latitude, altitude)
    pub fn position3d(&self) -> Vector3<f64> {
        self.geo.position3d(&self.platform)
    }

    pub fn checked_fix(&self) -> SensorResult<Position> {
        self.geo.checked_fix(&self.platform)
    }

    pub fn distance2d(&self, target_lat: f64, target_lon: f64) -> f64 {
        self.geo.distance2d(&self.platform, target_lat, target_lon)
    }

    pub fn distance2d_to(&self, target: Vector2<f64>) -> f64 {
        self.geo.distance2d_to(&self.platform, target)
    }

    /// Altitude delta is scaled like a degree delta; see [`GeoPosition`]
    pub fn distance3d(&self, target_lat: f64, target_lon: f64, target_alt: f64) -> f64 {
        self.geo.distance3d(&self.platform, target_lat, target_lon, target_alt)
    }

    pub fn distance3d_to(&self, target: Vector3<f64>) -> f64 {
        self.geo.distance3d_to(&self.platform, target)
    }

    // Heading

    pub fn heading_mode(&self) -> HeadingMode {
        self.heading.mode()
    }

    pub fn set_heading_mode(&mut self, mode: HeadingMode) {
        self.heading.set_mode(mode);
    }

    pub fn set_magnetic(&mut self, magnetic: bool) {
        self.heading.set_magnetic(magnetic);
    }

    pub fn is_magnetic(&self) -> bool {
        self.heading.is_magnetic()
    }

    pub fn rotation_value(&self) -> f32 {
        self.heading.rotation_value(&self.platform)
    }

    pub fn rotate2d(&self) -> Vector3<f32> {
        self.heading.rotate2d(&self.platform)
    }

    pub fn rotate3d(&self) -> Vector3<f32> {
        self.heading.rotate3d(&self.platform)
    }

    // Motion

    pub fn orientation_euler(&self) -> Vector3<f32> {
        self.motion.orientation_euler(&self.platform)
    }

    pub fn orientation_rotation(&self) -> UnitQuaternion<f32> {
        self.motion.orientation_rotation(&self.platform)
    }

    /// Compares against the previous call and updates the baseline
    pub fn is_moving(&mut self) -> bool {
        self.motion.is_moving(&self.platform)
    }

    pub fn motion_baseline(&self) -> Vector3<f32> {
        self.motion.baseline()
    }
}
