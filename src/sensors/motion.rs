//! Gyroscope attitude and a single-sample motion detector

use crate::core::MOVEMENT_THRESHOLD;
use crate::hardware::GyroProvider;
use crate::sensors::heading::wrap_degrees;
use nalgebra::{UnitQuaternion, Vector3};
use tracing::trace;

/// Gyroscope reader with motion-detection memory
///
/// `is_moving` compares each angular-rate sample with the previous one and
/// then replaces the baseline, so every call changes state. Two calls in a
/// row without real motion normally give `false` on the second.
#[derive(Debug, Clone)]
pub struct MotionSensor {
    baseline: Vector3<f32>,
    threshold: f32,
}

impl Default for MotionSensor {
    fn default() -> Self {
        Self::new(MOVEMENT_THRESHOLD)
    }
}

impl MotionSensor {
    pub fn new(threshold: f32) -> Self {
        Self {
            baseline: Vector3::zeros(),
            threshold,
        }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Angular rate seen by the last `is_moving` call
    pub fn baseline(&self) -> Vector3<f32> {
        self.baseline
    }

    pub fn reset_baseline(&mut self) {
        self.baseline = Vector3::zeros();
    }

    pub fn is_enabled<G: GyroProvider + ?Sized>(&self, gyro: &G) -> bool {
        gyro.is_gyro_enabled()
    }

    /// Attitude as per-axis angles in degrees, each in [0, 360)
    pub fn orientation_euler<G: GyroProvider + ?Sized>(&self, gyro: &G) -> Vector3<f32> {
        let (roll, pitch, yaw) = gyro.attitude().euler_angles();
        Vector3::new(roll, pitch, yaw).map(|angle| wrap_degrees(angle.to_degrees()))
    }

    /// Attitude as reported by the platform
    pub fn orientation_rotation<G: GyroProvider + ?Sized>(&self, gyro: &G) -> UnitQuaternion<f32> {
        gyro.attitude()
    }

    /// True iff the angular rate moved more than the threshold since the last call
    pub fn is_moving<G: GyroProvider + ?Sized>(&mut self, gyro: &G) -> bool {
        let current = gyro.rotation_rate();
        let difference = (current - self.baseline).norm();
        self.baseline = current;

        let moving = difference > self.threshold;
        trace!(difference, moving, "motion sample");
        moving
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hardware::MockPlatform;
    use std::f32::consts::FRAC_PI_2;

    fn angle_close(a: f32, b: f32) -> bool {
        let diff = (a - b).rem_euclid(360.0);
        diff < 1e-3 || diff > 360.0 - 1e-3
    }

    #[test]
    fn test_scripted_motion_sequence() {
        let samples = [
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(0.05, 0.0, 0.0),
            Vector3::new(0.3, 0.0, 0.0),
            Vector3::new(0.3, 0.0, 0.0),
            Vector3::new(0.3, 0.08, 0.0),
            Vector3::new(0.0, 0.0, 0.0),
        ];
        let platform = MockPlatform::new().with_rate_script(samples);
        let mut sensor = MotionSensor::default();

        let observed: Vec<bool> = (0..samples.len()).map(|_| sensor.is_moving(&platform)).collect();

        assert_eq!(observed, vec![false, false, true, false, false, true]);
        assert_eq!(sensor.baseline(), Vector3::zeros());
    }

    #[test]
    fn test_repeated_call_without_motion_settles() {
        let platform = MockPlatform::new().with_rate_script([Vector3::new(1.0, 1.0, 1.0)]);
        let mut sensor = MotionSensor::default();

        // First call compares against the zero baseline
        assert!(sensor.is_moving(&platform));
        assert!(!sensor.is_moving(&platform));
        assert_eq!(sensor.baseline(), Vector3::new(1.0, 1.0, 1.0));

        sensor.reset_baseline();
        assert!(sensor.is_moving(&platform));
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let platform = MockPlatform::new().with_rate_script([Vector3::new(0.5, 0.0, 0.0)]);
        let mut sensor = MotionSensor::new(0.5);
        assert!(!sensor.is_moving(&platform));
    }

    #[test]
    fn test_orientation_passthrough() {
        let attitude = UnitQuaternion::from_euler_angles(0.0, 0.0, FRAC_PI_2);
        let platform = MockPlatform::new().with_attitude(attitude);
        let sensor = MotionSensor::default();

        assert_eq!(sensor.orientation_rotation(&platform), attitude);

        let euler = sensor.orientation_euler(&platform);
        assert!(angle_close(euler.x, 0.0));
        assert!(angle_close(euler.y, 0.0));
        assert!(angle_close(euler.z, 90.0));
    }

    #[test]
    fn test_euler_angles_are_positive() {
        let attitude = UnitQuaternion::from_euler_angles(0.0, 0.0, -FRAC_PI_2);
        let platform = MockPlatform::new().with_attitude(attitude);
        let euler = MotionSensor::default().orientation_euler(&platform);

        assert!(angle_close(euler.z, 270.0));
        assert!(euler.iter().all(|angle| (0.0..360.0).contains(angle)));
    }
}
