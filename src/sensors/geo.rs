//! Position reads and flat-earth distances
//!
//! Vectors use (longitude, latitude[, altitude]) axis order, i.e. x is east.
//! Distances scale raw degree deltas by a constant meters-per-degree factor
//! and ignore earth curvature and meridian convergence, so they drift with
//! latitude and with range.
//!
//! Known defect: `distance3d` applies the same scale to the altitude delta,
//! which is already in meters. Callers get an altitude contribution inflated
//! by the scale factor.

use crate::core::{Position, ServiceStatus, METERS_PER_DEGREE};
use crate::hardware::LocationProvider;
use crate::sensors::error::{SensorError, SensorResult};
use nalgebra::{Vector2, Vector3};

/// Last known fix and distances derived from it
#[derive(Debug, Clone, Copy)]
pub struct GeoPosition {
    meters_per_degree: f64,
}

impl Default for GeoPosition {
    fn default() -> Self {
        Self::new(METERS_PER_DEGREE)
    }
}

impl GeoPosition {
    pub fn new(meters_per_degree: f64) -> Self {
        Self { meters_per_degree }
    }

    pub fn meters_per_degree(&self) -> f64 {
        self.meters_per_degree
    }

    pub fn latitude<L: LocationProvider + ?Sized>(&self, location: &L) -> f64 {
        location.last_fix().latitude
    }

    pub fn longitude<L: LocationProvider + ?Sized>(&self, location: &L) -> f64 {
        location.last_fix().longitude
    }

    pub fn altitude<L: LocationProvider + ?Sized>(&self, location: &L) -> f64 {
        location.last_fix().altitude
    }

    /// Current fix as (longitude, latitude)
    pub fn position2d<L: LocationProvider + ?Sized>(&self, location: &L) -> Vector2<f64> {
        let fix = location.last_fix();
        Vector2::new(fix.longitude, fix.latitude)
    }

    /// Current fix as (longitude, latitude, altitude)
    pub fn position3d<L: LocationProvider + ?Sized>(&self, location: &L) -> Vector3<f64> {
        let fix = location.last_fix();
        Vector3::new(fix.longitude, fix.latitude, fix.altitude)
    }

    /// Fix that is only returned once the service is running
    pub fn checked_fix<L: LocationProvider + ?Sized>(&self, location: &L) -> SensorResult<Position> {
        match location.status() {
            ServiceStatus::Running => Ok(location.last_fix()),
            status => Err(SensorError::ServiceNotRunning { status }),
        }
    }

    /// Approximate ground distance in meters to a target given as latitude, longitude
    pub fn distance2d<L: LocationProvider + ?Sized>(&self, location: &L, target_lat: f64, target_lon: f64) -> f64 {
        self.distance2d_to(location, Vector2::new(target_lon, target_lat))
    }

    /// Approximate ground distance in meters to a (longitude, latitude) point
    pub fn distance2d_to<L: LocationProvider + ?Sized>(&self, location: &L, target: Vector2<f64>) -> f64 {
        (self.position2d(location) - target).norm() * self.meters_per_degree
    }

    /// Distance in "meters" to a target given as latitude, longitude, altitude.
    /// The altitude delta is scaled like a degree delta; see the module docs.
    pub fn distance3d<L: LocationProvider + ?Sized>(
        &self,
        location: &L,
        target_lat: f64,
        target_lon: f64,
        target_alt: f64,
    ) -> f64 {
        self.distance3d_to(location, Vector3::new(target_lon, target_lat, target_alt))
    }

    /// Same as [`GeoPosition::distance3d`] for a (longitude, latitude, altitude) point
    pub fn distance3d_to<L: LocationProvider + ?Sized>(&self, location: &L, target: Vector3<f64>) -> f64 {
        (self.position3d(location) - target).norm() * self.meters_per_degree
    }
}
