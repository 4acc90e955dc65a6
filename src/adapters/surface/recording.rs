//! Recording page surface.
//!
//! Captures every surface mutation so tests can assert the exact control
//! set a state renders, that navigation went to the right target, and
//! that nothing touched the page on callback loads. Controls can be
//! marked missing to exercise the silent sub-flow disabling rules.

use std::collections::HashSet;
use std::sync::Mutex;

use crate::ports::{Control, PageSurface};

/// A recorded surface mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceOp {
    SetVisible { control: Control, visible: bool },
    SetText { control: Control, text: String },
    Navigate { url: String },
    PaywallRemoved,
}

/// `PageSurface` that records operations instead of mutating a DOM.
#[derive(Default)]
pub struct RecordingSurface {
    ops: Mutex<Vec<SurfaceOp>>,
    missing: HashSet<Control>,
}

impl RecordingSurface {
    /// A surface where every control exists.
    pub fn new() -> Self {
        Self::default()
    }

    /// A surface where the given controls are absent from the page.
    pub fn without_controls(missing: impl IntoIterator<Item = Control>) -> Self {
        Self {
            ops: Mutex::new(Vec::new()),
            missing: missing.into_iter().collect(),
        }
    }

    /// Every recorded operation, in order.
    pub fn ops(&self) -> Vec<SurfaceOp> {
        self.ops.lock().expect("surface lock poisoned").clone()
    }

    /// Every navigation target, in order.
    pub fn navigations(&self) -> Vec<String> {
        self.ops()
            .into_iter()
            .filter_map(|op| match op {
                SurfaceOp::Navigate { url } => Some(url),
                _ => None,
            })
            .collect()
    }

    /// The last visibility applied to a control, if any.
    pub fn visibility(&self, control: Control) -> Option<bool> {
        self.ops()
            .into_iter()
            .rev()
            .find_map(|op| match op {
                SurfaceOp::SetVisible { control: c, visible } if c == control => Some(visible),
                _ => None,
            })
    }

    /// The last text applied to a control, if any.
    pub fn text(&self, control: Control) -> Option<String> {
        self.ops()
            .into_iter()
            .rev()
            .find_map(|op| match op {
                SurfaceOp::SetText { control: c, text } if c == control => Some(text),
                _ => None,
            })
    }

    /// Returns true if the paywall widget was removed.
    pub fn paywall_removed(&self) -> bool {
        self.ops().contains(&SurfaceOp::PaywallRemoved)
    }

    fn record(&self, op: SurfaceOp) {
        self.ops.lock().expect("surface lock poisoned").push(op);
    }
}

impl PageSurface for RecordingSurface {
    fn has_control(&self, control: Control) -> bool {
        !self.missing.contains(&control)
    }

    fn set_visible(&self, control: Control, visible: bool) {
        if !self.has_control(control) {
            return;
        }
        self.record(SurfaceOp::SetVisible { control, visible });
    }

    fn set_text(&self, control: Control, text: &str) {
        if !self.has_control(control) {
            return;
        }
        self.record(SurfaceOp::SetText {
            control,
            text: text.to_string(),
        });
    }

    fn navigate(&self, url: &str) {
        self.record(SurfaceOp::Navigate {
            url: url.to_string(),
        });
    }

    fn remove_paywall_widget(&self) {
        self.record(SurfaceOp::PaywallRemoved);
    }
}
