//! A single visually hidden live region.

use herald_core::Signal;
use herald_core::logging::targets;
use parking_lot::RwLock;

use super::Politeness;

/// Attributes the rendering layer must put on a live region element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiveRegionAttributes {
    pub role: &'static str,
    pub aria_live: &'static str,
    pub aria_atomic: bool,
    /// Class that hides the region visually but keeps it in the a11y tree.
    pub class: &'static str,
}

/// One announcement slot.
///
/// The text is always replaced whole, never appended. Every actual change
/// is published through [`content_changed`](Self::content_changed) so the
/// rendered region can be updated.
#[derive(Debug)]
pub struct LiveRegion {
    politeness: Politeness,
    content: RwLock<String>,
    content_changed: Signal<String>,
}

impl LiveRegion {
    pub(crate) fn new(politeness: Politeness) -> Self {
        Self {
            politeness,
            content: RwLock::new(String::new()),
            content_changed: Signal::new(),
        }
    }

    pub fn politeness(&self) -> Politeness {
        self.politeness
    }

    /// Current text; empty when nothing is being announced.
    pub fn content(&self) -> String {
        self.content.read().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.content.read().is_empty()
    }

    pub fn attributes(&self) -> LiveRegionAttributes {
        LiveRegionAttributes {
            role: self.politeness.role(),
            aria_live: self.politeness.aria_live(),
            aria_atomic: true,
            class: "sr-only",
        }
    }

    /// Emitted with the new text each time the content changes.
    pub fn content_changed(&self) -> &Signal<String> {
        &self.content_changed
    }

    /// Write the content without notifying. Returns the text to
    /// [`publish`](Self::publish) if it changed.
    pub(crate) fn store(&self, text: String) -> Option<String> {
        let mut content = self.content.write();
        if *content == text {
            return None;
        }
        content.clone_from(&text);
        Some(text)
    }

    /// Notify observers of a change made by [`store`](Self::store).
    pub(crate) fn publish(&self, text: String) {
        tracing::trace!(
            target: targets::LIVE_REGION,
            politeness = self.politeness.aria_live(),
            text = %text,
            "live region updated"
        );
        self.content_changed.emit(text);
    }
}
