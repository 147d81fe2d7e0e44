//! Sensor components of the facade
//!
//! Each component keeps only its own state (heading mode, motion baseline,
//! distance scale) and reads the platform passed to it. `api::SensorManager`
//! bundles them with one platform instance.

pub mod error;
pub mod permission;
pub mod location;
pub mod geo;
pub mod heading;
pub mod motion;

pub use error::{SensorError, SensorResult};
pub use permission::PermissionGate;
pub use location::{
    LocationServiceController, StartOutcome, StartReport, StartupEvent, StartupPoll, StartupTask, WaitFor,
};
pub use geo::GeoPosition;
pub use heading::HeadingSensor;
pub use motion::MotionSensor;
