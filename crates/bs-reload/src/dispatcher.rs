//! Batch dispatch.
//!
//! Classifies a whole batch and publishes the resulting events. This is the
//! only place that emits `browser:reload`, which keeps the one-reload-per-batch
//! rule in a single spot.

use std::time::Instant;

use crate::classifier::{Classifier, ReloadDecision};
use crate::descriptor::ChangeDescriptor;
use crate::event::{EventBus, ReloadEvent};

/// Summary of what a dispatch published.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Number of `file:changed` events published.
    pub injected: usize,
    /// Whether `browser:reload` was published.
    pub reloaded: bool,
    /// Whether `_browser:reload` was published.
    pub signaled: bool,
}

impl BatchReport {
    /// True if nothing was published.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.injected == 0 && !self.reloaded && !self.signaled
    }
}

/// Publishes classified batches on an event bus.
pub struct Dispatcher<B> {
    bus: B,
    classifier: Classifier,
}

impl<B: EventBus> Dispatcher<B> {
    /// Create a dispatcher.
    #[must_use]
    pub fn new(bus: B, classifier: Classifier) -> Self {
        Self { bus, classifier }
    }

    /// Classifier used for every batch.
    #[must_use]
    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// Event bus events are published on.
    #[must_use]
    pub fn bus(&self) -> &B {
        &self.bus
    }

    /// Dispatch a batch.
    ///
    /// A bare reload (`had_no_args`) publishes only `_browser:reload` and skips
    /// classification. Otherwise every injectable descriptor gets its own
    /// `file:changed` event in input order, followed by at most one
    /// `browser:reload` if any descriptor requires it.
    pub fn dispatch(&self, descriptors: &[ChangeDescriptor], had_no_args: bool) -> BatchReport {
        if had_no_args {
            self.publish(ReloadEvent::InternalReload);
            tracing::info!("Unconditional reload requested");
            return BatchReport {
                signaled: true,
                ..BatchReport::default()
            };
        }

        self.dispatch_batch(descriptors, false)
    }

    /// Finalize a stream session.
    ///
    /// A `once` session publishes `_browser:reload` before anything else and
    /// always ends with a single `browser:reload`.
    pub fn dispatch_session(&self, descriptors: &[ChangeDescriptor], once: bool) -> BatchReport {
        if !once {
            return self.dispatch_batch(descriptors, false);
        }

        self.publish(ReloadEvent::InternalReload);
        BatchReport {
            signaled: true,
            ..self.dispatch_batch(descriptors, true)
        }
    }

    /// Classify and publish a batch, reloading at most once.
    fn dispatch_batch(&self, descriptors: &[ChangeDescriptor], force_reload: bool) -> BatchReport {
        let start = Instant::now();
        let mut report = BatchReport::default();
        let mut needs_reload = force_reload;

        for descriptor in descriptors {
            match self.classifier.classify(descriptor) {
                ReloadDecision::Inject(change) => {
                    self.publish(ReloadEvent::FileChanged(change));
                    report.injected += 1;
                }
                ReloadDecision::FullReload => {
                    tracing::debug!(
                        path = descriptor.path(),
                        ext = descriptor.extension(),
                        "Change requires full reload"
                    );
                    needs_reload = true;
                }
            }
        }

        if needs_reload {
            self.publish(ReloadEvent::BrowserReload);
            report.reloaded = true;
        }

        tracing::info!(
            changes = descriptors.len(),
            injected = report.injected,
            reloaded = report.reloaded,
            elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Reload batch dispatched"
        );

        report
    }

    fn publish(&self, event: ReloadEvent) {
        match event.file_change() {
            Some(change) => {
                tracing::debug!(
                    event = event.name(),
                    path = %change.path,
                    ext = %change.ext,
                    "Publishing"
                );
            }
            None => tracing::debug!(event = event.name(), "Publishing"),
        }
        self.bus.publish(event);
    }
}
