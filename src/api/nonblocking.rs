//! Non-blocking location service startup
//!
//! For callers with their own frame or scheduler loop: `begin_start` creates
//! the startup task and `poll_start` advances it, returning what to wait for
//! before the next poll. The manager never sleeps on this path.

use crate::api::callback::dispatch;
use crate::api::manager::SensorManager;
use crate::hardware::SensorPlatform;
use crate::sensors::{SensorError, SensorResult, StartOutcome, StartupPoll};

impl<P: SensorPlatform> SensorManager<P> {
    /// Begin a startup; fails if one is already in flight
    pub fn begin_start(&mut self, max_wait_seconds: u32) -> SensorResult<()> {
        if self.startup.is_some() {
            return Err(SensorError::StartupInProgress);
        }
        self.startup = Some(self.controller.begin(max_wait_seconds));
        Ok(())
    }

    /// Advance the startup in flight.
    /// Once it returns `Ready` the task is dropped and `begin_start` may be called again.
    pub fn poll_start(&mut self) -> SensorResult<StartupPoll> {
        let task = self.startup.as_mut().ok_or(SensorError::NoStartupInProgress)?;
        let callbacks = &self.callbacks;
        let poll = task.poll_with(&mut self.platform, &mut |event| dispatch(callbacks, &event));

        if let StartupPoll::Ready(report) = &poll {
            self.last_report = Some(report.clone());
            self.startup = None;
        }
        Ok(poll)
    }

    pub fn is_starting(&self) -> bool {
        self.startup.is_some()
    }

    /// Outcome of the startup in flight, `PermissionPending` while it still
    /// waits for the grant, else the outcome of the last finished one
    pub fn start_outcome(&self) -> Option<StartOutcome> {
        match &self.startup {
            Some(task) => task.outcome(),
            None => self.last_report.as_ref().map(|report| report.outcome),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::api::SensorManager;
    use crate::core::ServiceStatus::*;
    use crate::hardware::{MockPlatform, PermissionBehavior};
    use crate::sensors::{SensorError, StartOutcome, StartupPoll, WaitFor};

    #[test]
    fn test_poll_without_begin() {
        let mut manager = SensorManager::new(MockPlatform::new());
        assert_eq!(manager.poll_start(), Err(SensorError::NoStartupInProgress));
    }

    #[test]
    fn test_single_startup_at_a_time() {
        let mut manager = SensorManager::new(MockPlatform::new());
        manager.begin_start(3).unwrap();
        assert_eq!(manager.begin_start(3), Err(SensorError::StartupInProgress));
        assert!(manager.is_starting());
    }

    #[test]
    fn test_frame_driven_startup() {
        let platform = MockPlatform::new()
            .with_permission(PermissionBehavior::Denied)
            .with_status_script([Initializing, Initializing, Running]);
        let mut manager = SensorManager::new(platform);
        manager.begin_start(5).unwrap();

        assert_eq!(manager.poll_start(), Ok(StartupPoll::Pending(WaitFor::SchedulerTick)));
        assert_eq!(manager.start_outcome(), Some(StartOutcome::PermissionPending));

        manager.platform_mut().grant_permission();
        assert_eq!(manager.poll_start(), Ok(StartupPoll::Pending(WaitFor::OneSecond)));
        assert_eq!(manager.start_outcome(), None);
        assert_eq!(manager.poll_start(), Ok(StartupPoll::Pending(WaitFor::OneSecond)));

        let report = match manager.poll_start() {
            Ok(StartupPoll::Ready(report)) => report,
            other => panic!("expected ready, got {:?}", other),
        };
        assert_eq!(report.outcome, StartOutcome::Started);
        assert_eq!(report.seconds_waited, 2);
        assert_eq!(report.remaining_budget, 3);
        assert!(!manager.is_starting());
        assert!(manager.sensors_enabled());
        assert_eq!(manager.start_outcome(), Some(StartOutcome::Started));

        // A new startup can be issued after the previous one finished
        assert!(manager.begin_start(1).is_ok());
    }
}
