//! Utility modules for configuration and timing

pub mod config;
pub mod clock;

pub use config::{ConfigError, ConfigResult, ConfigurationManager, SensorConfig};
pub use clock::{Clock, ManualClock, SystemClock};
