//! Core data types for the sensor facade

use serde::{Deserialize, Serialize};

/// Last known location fix
///
/// Latitude and longitude are in degrees, altitude in meters. The platform
/// overwrites it whenever a new reading arrives; there is no staleness flag.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
}

impl Position {
    pub fn new(latitude: f64, longitude: f64, altitude: f64) -> Self {
        Self { latitude, longitude, altitude }
    }
}

/// Status of the platform location service, observed but never set by this crate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ServiceStatus {
    #[default]
    Stopped,
    Initializing,
    Running,
    Failed,
}

/// Which north the compass heading is measured against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HeadingMode {
    /// Relative to magnetic north
    Magnetic,
    /// Relative to geographic north
    #[default]
    True,
}
