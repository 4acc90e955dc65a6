//! Tracing page surface.
//!
//! Demo-binary implementation of the `PageSurface` port: every mutation
//! is logged instead of applied to a DOM.

use crate::ports::{Control, PageSurface};

/// `PageSurface` that logs each operation.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSurface;

impl TracingSurface {
    pub fn new() -> Self {
        Self
    }
}

impl PageSurface for TracingSurface {
    fn has_control(&self, _control: Control) -> bool {
        true
    }

    fn set_visible(&self, control: Control, visible: bool) {
        tracing::info!(?control, visible, "surface: set visibility");
    }

    fn set_text(&self, control: Control, text: &str) {
        tracing::info!(?control, text, "surface: set text");
    }

    fn navigate(&self, url: &str) {
        tracing::info!(url, "surface: navigate");
    }

    fn remove_paywall_widget(&self) {
        tracing::info!("surface: paywall widget removed");
    }
}
