//! Reload orchestration for live development servers.
//!
//! Given a set of changed files, decides whether connected browsers can
//! hot-swap the assets in place ("inject") or must reload the whole page, and
//! publishes the decision as events on an [`EventBus`].
//!
//! # Events
//!
//! | event | payload | per batch |
//! |---|---|---|
//! | `_browser:reload` | none | bare reloads and `once` stream sessions |
//! | `browser:reload` | none | 0 or 1 |
//! | `file:changed` | [`FileChange`] | one per injectable file |
//!
//! # Quick Start
//!
//! ```ignore
//! use bs_reload::{BroadcastBus, Reloader, StreamOptions, VirtualFile};
//!
//! let bus = BroadcastBus::default();
//! let mut events = bus.subscribe();
//! let reloader = Reloader::new(bus);
//!
//! // Injected: publishes one `file:changed`
//! reloader.reload("css/core.css")?;
//!
//! // Mixed batch: one `file:changed`, then a single `browser:reload`
//! reloader.reload(["css/core.css", "index.html"])?;
//!
//! // Legacy stream mode
//! let mut stream = reloader.stream(&StreamOptions::once())?;
//! stream.write(&VirtualFile::new("styles.css"));
//! stream.end();
//! ```
//!
//! # Architecture
//!
//! ```text
//! ChangeRequest ──► normalize ──► ChangeDescriptor* ──► Dispatcher ──► EventBus
//!                                                         │    ▲
//!                                                 Classifier   │
//!                                                              │
//! StreamSession (write*, end) ─────────────────────────────────┘
//! ```

mod classifier;
mod descriptor;
mod dispatcher;
mod error;
mod event;
#[cfg(any(test, feature = "mock"))]
mod mock;
mod reloader;
mod request;
mod stream;

pub use classifier::{Classifier, DEFAULT_INJECT_FILE_TYPES, ReloadDecision};
pub use descriptor::{ChangeDescriptor, FileLike, VirtualFile, normalize};
pub use dispatcher::{BatchReport, Dispatcher};
pub use error::ReloadError;
pub use event::{
    BROWSER_RELOAD, BroadcastBus, DEFAULT_CAPACITY, DEFAULT_NAMESPACE, EventBus, FILE_CHANGED,
    FileChange, INTERNAL_RELOAD, ReloadEvent,
};
#[cfg(any(test, feature = "mock"))]
pub use mock::RecordingBus;
pub use reloader::{Reload, Reloader, ReloaderConfig, reloader_config_from_config};
pub use request::{ChangeRequest, StreamOptions};
pub use stream::StreamSession;
