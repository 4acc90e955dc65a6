//! Tracing page event sink for the demo binary.

use crate::ports::{PageEvent, PageEvents};

/// `PageEvents` sink that logs each dispatched event.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingPageEvents;

impl TracingPageEvents {
    pub fn new() -> Self {
        Self
    }
}

impl PageEvents for TracingPageEvents {
    fn dispatch(&self, event: PageEvent) {
        tracing::info!(event = event.name(), "page event dispatched");
    }
}
