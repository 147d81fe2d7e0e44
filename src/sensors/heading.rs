//! Compass heading with selectable north reference

use crate::core::HeadingMode;
use crate::hardware::CompassProvider;
use nalgebra::Vector3;

/// Wrap an angle in degrees into [0, 360)
pub(crate) fn wrap_degrees(degrees: f32) -> f32 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Compass heading reader
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadingSensor {
    mode: HeadingMode,
}

impl HeadingSensor {
    pub fn new(mode: HeadingMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> HeadingMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: HeadingMode) {
        self.mode = mode;
    }

    pub fn is_magnetic(&self) -> bool {
        self.mode == HeadingMode::Magnetic
    }

    /// `true` selects magnetic north, `false` geographic north
    pub fn set_magnetic(&mut self, magnetic: bool) {
        self.mode = if magnetic { HeadingMode::Magnetic } else { HeadingMode::True };
    }

    pub fn is_enabled<C: CompassProvider + ?Sized>(&self, compass: &C) -> bool {
        compass.is_compass_enabled()
    }

    /// Heading in degrees, [0, 360), for the selected north
    pub fn rotation_value<C: CompassProvider + ?Sized>(&self, compass: &C) -> f32 {
        let heading = match self.mode {
            HeadingMode::Magnetic => compass.magnetic_heading(),
            HeadingMode::True => compass.true_heading(),
        };
        wrap_degrees(heading)
    }

    /// Heading on the first axis, for rotating a flat object
    pub fn rotate2d<C: CompassProvider + ?Sized>(&self, compass: &C) -> Vector3<f32> {
        Vector3::new(self.rotation_value(compass), 0.0, 0.0)
    }

    /// Heading on the second (up) axis, for rotating an object in 3D space
    pub fn rotate3d<C: CompassProvider + ?Sized>(&self, compass: &C) -> Vector3<f32> {
        Vector3::new(0.0, self.rotation_value(compass), 0.0)
    }
}
