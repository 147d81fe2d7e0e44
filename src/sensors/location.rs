//! Location service startup and liveness
//!
//! Startup runs in three phases: wait for the permission grant, issue the
//! hardware start command, then poll the service status once per second
//! until it leaves `Initializing` or the wait budget is spent. Compass and
//! gyroscope reads are enabled only when the service reports `Running` with
//! budget still left; once the budget reaches zero the attempt ends as
//! `TimedOut` (or `HardwareFailed` on `Failed`) and the sensors stay off.
//!
//! A service that drops back to `Stopped` after the start command is treated
//! as a hardware failure rather than as running.
//!
//! [`StartupTask`] is the externally driven form of that sequence: the caller
//! polls it and performs the wait it asks for. The blocking driver in
//! [`LocationServiceController::start_service`] does exactly that with an
//! injectable [`Clock`].

use crate::core::ServiceStatus;
use crate::hardware::SensorPlatform;
use crate::sensors::permission::PermissionGate;
use crate::utils::Clock;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, trace, warn};

/// How a startup attempt ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StartOutcome {
    /// Service is running and heading/motion reads are enabled
    Started,
    /// Permission was never granted within the configured tick limit
    PermissionPending,
    /// The platform reported the service as failed
    HardwareFailed,
    /// The service was still initializing when the wait budget ran out
    TimedOut,
}

impl StartOutcome {
    pub fn is_started(&self) -> bool {
        matches!(self, StartOutcome::Started)
    }
}

/// Summary of a finished startup attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartReport {
    pub outcome: StartOutcome,
    /// One-second polling ticks spent while the service was initializing
    pub seconds_waited: u32,
    /// Unused part of the wait budget
    pub remaining_budget: u32,
    /// Scheduler ticks spent waiting for the permission grant
    pub permission_ticks: u32,
}

/// What the caller must wait for before polling again
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitFor {
    /// One scheduler tick; permission is re-tested on the next poll
    SchedulerTick,
    /// One second of wall time; already charged against the budget
    OneSecond,
}

/// Result of a single [`StartupTask::poll`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartupPoll {
    Pending(WaitFor),
    Ready(StartReport),
}

/// Progress notifications emitted while a startup task runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartupEvent {
    PermissionRequested,
    PermissionGranted { ticks_waited: u32 },
    HardwareStartIssued { max_wait_seconds: u32 },
    InitializingTick { remaining_budget: u32 },
    Finished(StartReport),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Phase {
    AwaitingPermission { requested: bool },
    Initializing { remaining: u32 },
    Finished(StartReport),
}

/// Externally driven location service startup
#[derive(Debug, Clone)]
pub struct StartupTask {
    gate: PermissionGate,
    phase: Phase,
    max_wait_seconds: u32,
    permission_wait_limit: Option<u32>,
    permission_ticks: u32,
    seconds_waited: u32,
}

impl StartupTask {
    pub fn new(max_wait_seconds: u32) -> Self {
        Self {
            gate: PermissionGate::new(),
            phase: Phase::AwaitingPermission { requested: false },
            max_wait_seconds,
            permission_wait_limit: None,
            permission_ticks: 0,
            seconds_waited: 0,
        }
    }

    /// Stop waiting for permission after `limit` scheduler ticks
    pub fn with_permission_wait_limit(mut self, limit: Option<u32>) -> Self {
        self.permission_wait_limit = limit;
        self
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.phase, Phase::Finished(_))
    }

    pub fn is_awaiting_permission(&self) -> bool {
        matches!(self.phase, Phase::AwaitingPermission { .. })
    }

    /// Wait budget left in the polling phase, or the full budget before it
    pub fn remaining_budget(&self) -> u32 {
        match &self.phase {
            Phase::AwaitingPermission { .. } => self.max_wait_seconds,
            Phase::Initializing { remaining } => *remaining,
            Phase::Finished(report) => report.remaining_budget,
        }
    }

    /// Outcome so far. A task still waiting for the grant reports
    /// `PermissionPending`; one in the polling phase has no outcome yet.
    pub fn outcome(&self) -> Option<StartOutcome> {
        match &self.phase {
            Phase::AwaitingPermission { .. } => Some(StartOutcome::PermissionPending),
            Phase::Initializing { .. } => None,
            Phase::Finished(report) => Some(report.outcome),
        }
    }

    pub fn poll<P: SensorPlatform + ?Sized>(&mut self, platform: &mut P) -> StartupPoll {
        self.poll_with(platform, &mut |_| {})
    }

    /// Advance as far as possible without waiting.
    ///
    /// Each `Pending` asks the caller to wait before polling again. Polling a
    /// finished task returns the same report again.
    pub fn poll_with<P, F>(&mut self, platform: &mut P, observer: &mut F) -> StartupPoll
    where
        P: SensorPlatform + ?Sized,
        F: FnMut(StartupEvent),
    {
        loop {
            match self.phase.clone() {
                Phase::Finished(report) => return StartupPoll::Ready(report),
                Phase::AwaitingPermission { requested } => {
                    if self.gate.is_authorized(platform) {
                        if requested {
                            debug!(ticks = self.permission_ticks, "location permission granted");
                            observer(StartupEvent::PermissionGranted {
                                ticks_waited: self.permission_ticks,
                            });
                        }
                        platform.start();
                        info!(max_wait_seconds = self.max_wait_seconds, "location service start issued");
                        observer(StartupEvent::HardwareStartIssued {
                            max_wait_seconds: self.max_wait_seconds,
                        });
                        self.phase = Phase::Initializing { remaining: self.max_wait_seconds };
                        continue;
                    }

                    if !requested {
                        self.gate.check(platform);
                        observer(StartupEvent::PermissionRequested);
                        self.phase = Phase::AwaitingPermission { requested: true };
                        continue;
                    }

                    if let Some(limit) = self.permission_wait_limit {
                        if self.permission_ticks >= limit {
                            warn!(ticks = self.permission_ticks, "gave up waiting for location permission");
                            let budget = self.max_wait_seconds;
                            return self.finish(platform, StartOutcome::PermissionPending, budget, observer);
                        }
                    }
                    self.permission_ticks += 1;
                    trace!(ticks = self.permission_ticks, "waiting for location permission");
                    return StartupPoll::Pending(WaitFor::SchedulerTick);
                }
                Phase::Initializing { remaining } => {
                    let status = platform.status();
                    if status == ServiceStatus::Initializing && remaining > 0 {
                        let remaining = remaining - 1;
                        self.seconds_waited += 1;
                        self.phase = Phase::Initializing { remaining };
                        trace!(remaining, "location service initializing");
                        observer(StartupEvent::InitializingTick { remaining_budget: remaining });
                        return StartupPoll::Pending(WaitFor::OneSecond);
                    }

                    // Failed wins; otherwise a spent budget ends the attempt
                    let outcome = match status {
                        ServiceStatus::Failed => StartOutcome::HardwareFailed,
                        _ if remaining == 0 => StartOutcome::TimedOut,
                        ServiceStatus::Running => StartOutcome::Started,
                        ServiceStatus::Initializing => StartOutcome::TimedOut,
                        ServiceStatus::Stopped => StartOutcome::HardwareFailed,
                    };
                    return self.finish(platform, outcome, remaining, observer);
                }
            }
        }
    }

    fn finish<P, F>(
        &mut self,
        platform: &mut P,
        outcome: StartOutcome,
        remaining_budget: u32,
        observer: &mut F,
    ) -> StartupPoll
    where
        P: SensorPlatform + ?Sized,
        F: FnMut(StartupEvent),
    {
        if outcome.is_started() {
            platform.set_compass_enabled(true);
            platform.set_gyro_enabled(true);
            info!(seconds_waited = self.seconds_waited, "location service running, heading and motion enabled");
        } else {
            warn!(?outcome, seconds_waited = self.seconds_waited, "location service did not start");
        }

        let report = StartReport {
            outcome,
            seconds_waited: self.seconds_waited,
            remaining_budget,
            permission_ticks: self.permission_ticks,
        };
        self.phase = Phase::Finished(report.clone());
        observer(StartupEvent::Finished(report.clone()));
        StartupPoll::Ready(report)
    }
}

/// Starts the platform location service and answers liveness queries
#[derive(Debug, Clone, Default)]
pub struct LocationServiceController {
    gate: PermissionGate,
    permission_wait_limit: Option<u32>,
}

impl LocationServiceController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_permission_wait_limit(mut self, limit: Option<u32>) -> Self {
        self.permission_wait_limit = limit;
        self
    }

    /// Create a startup task for the caller to drive
    pub fn begin(&self, max_wait_seconds: u32) -> StartupTask {
        StartupTask::new(max_wait_seconds).with_permission_wait_limit(self.permission_wait_limit)
    }

    pub fn start_service<P, C>(&self, platform: &mut P, max_wait_seconds: u32, clock: &mut C) -> StartReport
    where
        P: SensorPlatform + ?Sized,
        C: Clock + ?Sized,
    {
        self.start_service_with(platform, max_wait_seconds, clock, &mut |_| {})
    }

    /// Run startup to completion, waiting on `clock` between polls.
    ///
    /// There is no cancellation; with no permission wait limit this only
    /// returns once permission has been granted.
    pub fn start_service_with<P, C, F>(
        &self,
        platform: &mut P,
        max_wait_seconds: u32,
        clock: &mut C,
        observer: &mut F,
    ) -> StartReport
    where
        P: SensorPlatform + ?Sized,
        C: Clock + ?Sized,
        F: FnMut(StartupEvent),
    {
        let span = tracing::info_span!("start_service", max_wait_seconds);
        let _guard = span.enter();

        let mut task = self.begin(max_wait_seconds);
        loop {
            match task.poll_with(platform, observer) {
                StartupPoll::Pending(WaitFor::SchedulerTick) => clock.wait_tick(),
                StartupPoll::Pending(WaitFor::OneSecond) => clock.sleep(Duration::from_secs(1)),
                StartupPoll::Ready(report) => return report,
            }
        }
    }

    /// True iff the user has location enabled and the service is running
    pub fn is_service_healthy<P: SensorPlatform + ?Sized>(&self, platform: &P) -> bool {
        platform.is_enabled_by_user() && platform.status() == ServiceStatus::Running
    }

    pub fn is_authorized<P: SensorPlatform + ?Sized>(&self, platform: &P) -> bool {
        self.gate.is_authorized(platform)
    }
}
