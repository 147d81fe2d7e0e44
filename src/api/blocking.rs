//! Blocking location service startup
//!
//! Runs the whole startup sequence on the calling thread, waiting on a
//! [`Clock`] between polls. Nothing can cancel a call once it is made.

use crate::api::callback::dispatch;
use crate::api::manager::SensorManager;
use crate::hardware::SensorPlatform;
use crate::sensors::StartReport;
use crate::utils::{Clock, SystemClock};

impl<P: SensorPlatform> SensorManager<P> {
    /// Start the location service, waiting on `clock`.
    ///
    /// Permission is requested if missing and then waited for without a bound
    /// unless `permission_wait_limit` is configured. The hardware then gets up
    /// to `max_wait_seconds` one-second polls to leave `Initializing`.
    pub fn start_service<C: Clock + ?Sized>(&mut self, max_wait_seconds: u32, clock: &mut C) -> StartReport {
        let callbacks = &self.callbacks;
        let report = self.controller.start_service_with(
            &mut self.platform,
            max_wait_seconds,
            clock,
            &mut |event| dispatch(callbacks, &event),
        );
        self.last_report = Some(report.clone());
        report
    }

    /// Start with the configured budget, sleeping in real time
    pub fn start_service_realtime(&mut self) -> StartReport {
        let mut clock = SystemClock::new(self.config.permission_poll_interval());
        let max_wait_seconds = self.config.max_wait_seconds;
        self.start_service(max_wait_seconds, &mut clock)
    }
}
