//! Snapshot of all sensor reads for logging and display

use crate::api::manager::SensorManager;
use crate::core::HeadingMode;
use crate::hardware::SensorPlatform;
use crate::sensors::StartOutcome;
use serde::{Deserialize, Serialize};

/// Point-in-time view of every read-only sensor query
///
/// Taking a snapshot does not touch the motion baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorSnapshot {
    pub authorized: bool,
    pub service_healthy: bool,
    pub sensors_enabled: bool,
    pub start_outcome: Option<StartOutcome>,
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
    pub heading_mode: HeadingMode,
    /// Degrees for the selected north
    pub heading: f32,
    /// Attitude as per-axis angles in degrees
    pub orientation: [f32; 3],
    /// Attitude as a quaternion, (i, j, k, w)
    pub rotation: [f32; 4],
}

impl<P: SensorPlatform> SensorManager<P> {
    pub fn snapshot(&self) -> SensorSnapshot {
        let euler = self.orientation_euler();
        let rotation = self.orientation_rotation();
        SensorSnapshot {
            authorized: self.is_authorized(),
            service_healthy: self.is_service_healthy(),
            sensors_enabled: self.sensors_enabled(),
            start_outcome: self.start_outcome(),
            latitude: self.latitude(),
            longitude: self.longitude(),
            altitude: self.altitude(),
            heading_mode: self.heading_mode(),
            heading: self.rotation_value(),
            orientation: [euler.x, euler.y, euler.z],
            rotation: [rotation.i, rotation.j, rotation.k, rotation.w],
        }
    }
}

/// JSON formatter for snapshots
#[derive(Debug, Clone, Default)]
pub struct JsonFormatter {
    pub pretty: bool,
}

impl JsonFormatter {
    pub fn new() -> Self {
        Self { pretty: false }
    }

    pub fn pretty() -> Self {
        Self { pretty: true }
    }

    pub fn format_json(&self, snapshot: &SensorSnapshot) -> Result<String, serde_json::Error> {
        if self.pretty {
            serde_json::to_string_pretty(snapshot)
        } else {
            serde_json::to_string(snapshot)
        }
    }
}

/// Human-readable text formatter
#[derive(Debug, Clone, Default)]
pub struct TextFormatter {
    pub compact: bool,
}

impl TextFormatter {
    pub fn format_text(&self, snapshot: &SensorSnapshot) -> String {
        let status = match (snapshot.service_healthy, snapshot.start_outcome) {
            (true, _) => "running".to_string(),
            (false, Some(outcome)) => format!("{:?}", outcome),
            (false, None) => "not started".to_string(),
        };
        let north = match snapshot.heading_mode {
            HeadingMode::Magnetic => "mag",
            HeadingMode::True => "true",
        };

        if self.compact {
            format!(
                "[{}] {:.6},{:.6},{:.1}m hdg {:.1}°{}",
                status, snapshot.latitude, snapshot.longitude, snapshot.altitude, snapshot.heading, north
            )
        } else {
            let mut output = String::new();
            output.push_str(&format!("Location service: {}\n", status));
            output.push_str(&format!("  Latitude:  {:.6}°\n", snapshot.latitude));
            output.push_str(&format!("  Longitude: {:.6}°\n", snapshot.longitude));
            output.push_str(&format!("  Altitude:  {:.1} m\n", snapshot.altitude));
            output.push_str(&format!("  Heading:   {:.1}° ({})\n", snapshot.heading, north));
            output.push_str(&format!(
                "  Attitude:  {:.1}°, {:.1}°, {:.1}°\n",
                snapshot.orientation[0], snapshot.orientation[1], snapshot.orientation[2]
            ));
            output
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Position;
    use crate::hardware::MockPlatform;
    use crate::utils::ManualClock;
    use nalgebra::Vector3;

    fn started_manager() -> SensorManager<MockPlatform> {
        let platform = MockPlatform::new()
            .with_fix(Position::new(35.1796, 129.0756, 12.0))
            .with_headings(100.0, 95.5)
            .with_rate_script([Vector3::new(1.0, 0.0, 0.0)]);
        let mut manager = SensorManager::new(platform);
        manager.start_service(3, &mut ManualClock::new());
        manager
    }

    #[test]
    fn test_snapshot_contents() {
        let manager = started_manager();
        let snapshot = manager.snapshot();

        assert!(snapshot.authorized);
        assert!(snapshot.service_healthy);
        assert!(snapshot.sensors_enabled);
        assert_eq!(snapshot.start_outcome, Some(StartOutcome::Started));
        assert_eq!(snapshot.latitude, 35.1796);
        assert_eq!(snapshot.heading, 95.5);
        assert_eq!(snapshot.rotation, [0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_snapshot_leaves_motion_baseline_alone() {
        let mut manager = started_manager();
        manager.snapshot();
        assert_eq!(manager.motion_baseline(), Vector3::zeros());
        assert!(manager.is_moving());
    }

    #[test]
    fn test_json_output() {
        let snapshot = started_manager().snapshot();

        let json = JsonFormatter::new().format_json(&snapshot).unwrap();
        assert!(json.contains("\"heading_mode\":\"True\""));
        assert!(json.contains("\"start_outcome\":\"Started\""));

        let parsed: SensorSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, snapshot);

        let pretty = JsonFormatter::pretty().format_json(&snapshot).unwrap();
        assert!(pretty.contains('\n'));
    }

    #[test]
    fn test_text_output() {
        let snapshot = started_manager().snapshot();

        let compact = TextFormatter { compact: true }.format_text(&snapshot);
        assert_eq!(compact, "[running] 35.179600,129.075600,12.0m hdg 95.5°true");

        let full = TextFormatter::default().format_text(&snapshot);
        assert!(full.starts_with("Location service: running\n"));
        assert!(full.contains("Heading:   95.5° (true)"));
    }
}
