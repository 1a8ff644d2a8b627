//! Event bus that prints events as they are published.
//!
//! The CLI has no long-lived subscribers, so every event is serialized and
//! written immediately instead of being buffered in a channel.

use std::io::Write;
use std::sync::{Mutex, PoisonError};

use bs_reload::{EventBus, ReloadEvent};

/// Writes each published event as one JSON document per line.
pub(crate) struct JsonLinesBus<W> {
    writer: Mutex<W>,
}

impl<W: Write + Send> JsonLinesBus<W> {
    /// Create a bus writing to `writer`.
    pub(crate) fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }
}

impl<W: Write + Send> EventBus for JsonLinesBus<W> {
    fn publish(&self, event: ReloadEvent) {
        let line = match serde_json::to_string(&event) {
            Ok(line) => line,
            Err(e) => {
                tracing::warn!(event = event.name(), error = %e, "Failed to serialize event");
                return;
            }
        };

        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(e) = writeln!(writer, "{line}") {
            tracing::warn!(event = event.name(), error = %e, "Failed to write event");
        }
    }
}

#[cfg(test)]
impl JsonLinesBus<Vec<u8>> {
    /// Lines written so far.
    pub(crate) fn lines(&self) -> Vec<String> {
        let writer = self.writer.lock().unwrap();
        String::from_utf8_lossy(&writer)
            .lines()
            .map(str::to_owned)
            .collect()
    }
}
