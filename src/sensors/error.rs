//! Sensor facade error types

use crate::core::ServiceStatus;
use thiserror::Error;

/// Errors from the checked sensor reads and the non-blocking startup API
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SensorError {
    /// A fix was requested before the location service reached `Running`
    #[error("location service is not running (status {status:?})")]
    ServiceNotRunning { status: ServiceStatus },
    /// A startup task is already being driven
    #[error("location service startup already in progress")]
    StartupInProgress,
    /// `poll_start` was called without `begin_start`
    #[error("no location service startup in progress")]
    NoStartupInProgress,
}

pub type SensorResult<T> = Result<T, SensorError>;
