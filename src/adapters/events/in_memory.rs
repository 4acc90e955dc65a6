//! In-memory page event sink.

use std::sync::Mutex;

use crate::ports::{PageEvent, PageEvents};

/// `PageEvents` sink that collects dispatched events for inspection.
#[derive(Default)]
pub struct InMemoryPageEvents {
    events: Mutex<Vec<PageEvent>>,
}

impl InMemoryPageEvents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every event dispatched so far, in order.
    pub fn dispatched(&self) -> Vec<PageEvent> {
        self.events.lock().expect("event sink lock poisoned").clone()
    }
}

impl PageEvents for InMemoryPageEvents {
    fn dispatch(&self, event: PageEvent) {
        self.events.lock().expect("event sink lock poisoned").push(event);
    }
}
