//! Startup event subscriptions
//!
//! Callbacks registered on a [`SensorManager`] see every [`StartupEvent`]
//! produced by both the blocking and the non-blocking startup paths, in
//! registration order.

use crate::api::manager::SensorManager;
use crate::hardware::SensorPlatform;
use crate::sensors::StartupEvent;

/// Callback function type for startup events
pub type StartupCallback = Box<dyn Fn(&StartupEvent) + Send>;

/// Callback registration handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallbackHandle(u32);

impl CallbackHandle {
    fn new(id: u32) -> Self {
        CallbackHandle(id)
    }

    pub fn id(&self) -> u32 {
        self.0
    }
}

pub(crate) fn dispatch(callbacks: &[(CallbackHandle, StartupCallback)], event: &StartupEvent) {
    for (_, callback) in callbacks {
        callback(event);
    }
}

impl<P: SensorPlatform> SensorManager<P> {
    /// Register a callback for startup events
    pub fn subscribe(&mut self, callback: StartupCallback) -> CallbackHandle {
        self.callback_counter += 1;
        let handle = CallbackHandle::new(self.callback_counter);
        self.callbacks.push((handle, callback));
        handle
    }

    /// Remove a callback; returns false if the handle was unknown
    pub fn unsubscribe(&mut self, handle: CallbackHandle) -> bool {
        let before = self.callbacks.len();
        self.callbacks.retain(|(h, _)| *h != handle);
        self.callbacks.len() != before
    }

    pub fn callback_count(&self) -> usize {
        self.callbacks.len()
    }
}
