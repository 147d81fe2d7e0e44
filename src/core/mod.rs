//! Core types and constants for the sensor facade

pub mod types;
pub mod constants;

pub use types::*;
pub use constants::*;
