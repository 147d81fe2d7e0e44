//! Wait sources for the blocking startup driver

use std::time::Duration;

/// Something the startup driver can wait on
pub trait Clock {
    /// Wait for one scheduler tick (permission phase)
    fn wait_tick(&mut self);

    /// Wait for the given duration (hardware polling phase)
    fn sleep(&mut self, duration: Duration);
}

/// Wall-clock waits backed by `std::thread::sleep`
#[derive(Debug, Clone)]
pub struct SystemClock {
    tick: Duration,
}

impl SystemClock {
    pub fn new(tick: Duration) -> Self {
        Self { tick }
    }

    pub fn tick(&self) -> Duration {
        self.tick
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new(Duration::from_millis(crate::core::DEFAULT_PERMISSION_POLL_INTERVAL_MS))
    }
}

impl Clock for SystemClock {
    fn wait_tick(&mut self) {
        std::thread::sleep(self.tick);
    }

    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Simulated clock that only records what was asked of it
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    ticks: u32,
    slept: Duration,
    sleeps: u32,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scheduler ticks waited so far
    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    /// Number of `sleep` calls
    pub fn sleeps(&self) -> u32 {
        self.sleeps
    }

    /// Total simulated sleep time
    pub fn elapsed(&self) -> Duration {
        self.slept
    }
}

impl Clock for ManualClock {
    fn wait_tick(&mut self) {
        self.ticks += 1;
    }

    fn sleep(&mut self, duration: Duration) {
        self.sleeps += 1;
        self.slept += duration;
    }
}
