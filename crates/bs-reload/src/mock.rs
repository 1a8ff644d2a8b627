//! Capturing event bus for testing.
//!
//! Provides [`RecordingBus`] for asserting on published events without a
//! transport attached.

use std::sync::Mutex;

use crate::event::{EventBus, ReloadEvent};

/// Event bus that records every published event in order.
///
/// # Example
///
/// ```ignore
/// use std::sync::Arc;
/// use bs_reload::{RecordingBus, Reloader};
///
/// let bus = Arc::new(RecordingBus::new());
/// let reloader = Reloader::new(Arc::clone(&bus));
/// reloader.reload_path("css/core.css");
///
/// assert_eq!(bus.names(), vec!["file:changed"]);
/// ```
#[derive(Debug, Default)]
pub struct RecordingBus {
    events: Mutex<Vec<ReloadEvent>>,
}

impl RecordingBus {
    /// Create an empty recording bus.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded events, oldest first.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn events(&self) -> Vec<ReloadEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Names of all recorded events, oldest first.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .map(ReloadEvent::name)
            .collect()
    }

    /// Number of recorded events with the given name.
    #[must_use]
    pub fn count(&self, name: &str) -> usize {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|event| event.name() == name)
            .count()
    }

    /// Forget all recorded events.
    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }
}

impl EventBus for RecordingBus {
    fn publish(&self, event: ReloadEvent) {
        self.events.lock().unwrap().push(event);
    }
}
