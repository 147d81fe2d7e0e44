//! Application-facing API
//!
//! [`SensorManager`] bundles one platform with the sensor components. Startup
//! can be driven blocking (with an injectable clock), non-blocking (poll from
//! the caller's own loop), and observed through event callbacks.

pub mod manager;
pub mod blocking;
pub mod nonblocking;
pub mod callback;
pub mod formatting;

pub use manager::SensorManager;
pub use callback::{CallbackHandle, StartupCallback};
pub use formatting::{JsonFormatter, SensorSnapshot, TextFormatter};
