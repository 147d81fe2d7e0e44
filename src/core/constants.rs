//! Fixed scale factors and thresholds

/// Meters per degree of arc at the equator, used for every flat-earth distance
pub const METERS_PER_DEGREE: f64 = 111_000.0;

/// Minimum angular-rate change between two samples that counts as movement
pub const MOVEMENT_THRESHOLD: f32 = 0.1;

/// Default budget (seconds) for the location hardware to leave `Initializing`
pub const DEFAULT_MAX_WAIT_SECONDS: u32 = 20;

/// Default delay between permission re-checks when driven by a real clock (milliseconds)
pub const DEFAULT_PERMISSION_POLL_INTERVAL_MS: u64 = 100;
