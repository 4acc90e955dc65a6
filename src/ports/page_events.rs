//! Page-wide notification port.
//!
//! Other on-page scripts listen for these events; the paywall vendor
//! script in particular keys off `entitled`/`not-entitled`. Exactly one of
//! those two is dispatched per load, after `session-ready`.

/// Outbound page-wide notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageEvent {
    /// Identity resolution has completed; the resolved identity (if any)
    /// is readable through the page-load accessor.
    SessionReady,

    /// Paywall bypass granted; the paywall widget is being removed.
    Entitled,

    /// No paywall bypass; the paywall widget is left untouched.
    NotEntitled,
}

impl PageEvent {
    /// The event name as dispatched on the page.
    pub fn name(&self) -> &'static str {
        match self {
            PageEvent::SessionReady => "herald:session-ready",
            PageEvent::Entitled => "herald:entitled",
            PageEvent::NotEntitled => "herald:not-entitled",
        }
    }
}

/// Dispatches page-wide notifications.
pub trait PageEvents: Send + Sync {
    fn dispatch(&self, event: PageEvent);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_names_are_namespaced() {
        assert_eq!(PageEvent::SessionReady.name(), "herald:session-ready");
        assert_eq!(PageEvent::Entitled.name(), "herald:entitled");
        assert_eq!(PageEvent::NotEntitled.name(), "herald:not-entitled");
    }

    #[test]
    fn page_events_is_object_safe_and_send_sync() {
        fn _assert_trait_object(_: &dyn PageEvents) {}
        fn _assert_arc_send_sync<T: Send + Sync + ?Sized>() {}
        _assert_arc_send_sync::<std::sync::Arc<dyn PageEvents>>();
    }
}
