//! Reload events and the bus they are published on.
//!
//! The orchestrator never owns client connections. It publishes [`ReloadEvent`]s
//! on an [`EventBus`] and downstream transports subscribe to them.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::broadcast;

/// Event name of the internal reload pre-signal.
pub const INTERNAL_RELOAD: &str = "_browser:reload";
/// Event name instructing clients to reload the whole page.
pub const BROWSER_RELOAD: &str = "browser:reload";
/// Event name carrying an injectable file change.
pub const FILE_CHANGED: &str = "file:changed";

/// Namespace of changes that are not claimed by a plugin.
pub const DEFAULT_NAMESPACE: &str = "core";

/// Payload of a `file:changed` event.
///
/// Field order matches the wire format consumed by browser clients.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FileChange {
    /// Path exactly as announced by the caller (may be a glob).
    pub path: String,
    /// Last path segment.
    pub basename: String,
    /// Whether clients should log the change.
    pub log: bool,
    /// Asset group the change belongs to.
    pub namespace: String,
    /// Kind of change (always "change").
    pub event: String,
    /// Lowercased file extension.
    pub ext: String,
}

/// Event published by the orchestrator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "event", content = "data")]
pub enum ReloadEvent {
    /// Internal pre-signal for unconditional reloads.
    #[serde(rename = "_browser:reload")]
    InternalReload,
    /// Full page reload.
    #[serde(rename = "browser:reload")]
    BrowserReload,
    /// In-place injection of a changed asset.
    #[serde(rename = "file:changed")]
    FileChanged(FileChange),
}

impl ReloadEvent {
    /// Wire name of the event.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::InternalReload => INTERNAL_RELOAD,
            Self::BrowserReload => BROWSER_RELOAD,
            Self::FileChanged(_) => FILE_CHANGED,
        }
    }

    /// Payload of a `file:changed` event.
    #[must_use]
    pub fn file_change(&self) -> Option<&FileChange> {
        match self {
            Self::FileChanged(change) => Some(change),
            _ => None,
        }
    }
}

/// Publish side of a process-wide event channel.
///
/// Publication is fire-and-forget: implementations must not block on
/// subscribers and must not report delivery failures back to the caller.
pub trait EventBus: Send + Sync {
    /// Publish an event to every subscriber.
    fn publish(&self, event: ReloadEvent);
}

impl<B: EventBus + ?Sized> EventBus for Arc<B> {
    fn publish(&self, event: ReloadEvent) {
        (**self).publish(event);
    }
}

impl<B: EventBus + ?Sized> EventBus for &B {
    fn publish(&self, event: ReloadEvent) {
        (**self).publish(event);
    }
}

/// Default capacity of the broadcast channel.
pub const DEFAULT_CAPACITY: usize = 100;

/// Event bus backed by a [`tokio::sync::broadcast`] channel.
///
/// Subscribers that fall behind by more than the channel capacity lose the
/// oldest events, so a slow transport never stalls the orchestrator.
#[derive(Clone, Debug)]
pub struct BroadcastBus {
    sender: broadcast::Sender<ReloadEvent>,
}

impl BroadcastBus {
    /// Create a bus with the given channel capacity.
    ///
    /// A capacity of zero is bumped to one.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _rx) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Get a receiver for events published from now on.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<ReloadEvent> {
        self.sender.subscribe()
    }

    /// Number of live subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for BroadcastBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl EventBus for BroadcastBus {
    fn publish(&self, event: ReloadEvent) {
        let name = event.name();
        // No subscribers is not an error for the publisher
        if self.sender.send(event).is_err() {
            tracing::trace!(event = name, "No subscribers for reload event");
        }
    }
}
