//! Returning focus to the trigger when a surface closes.

use herald_core::logging::targets;

use super::FocusHost;

/// Remembers which element had focus when a surface opened.
///
/// Drive it with the surface's open flag on every render or state change.
/// Each surface owns its own record, so stacked surfaces restore in reverse
/// order of opening.
#[derive(Debug, Clone)]
pub struct FocusReturn<E> {
    is_open: bool,
    saved: Option<E>,
}

impl<E> Default for FocusReturn<E> {
    fn default() -> Self {
        Self {
            is_open: false,
            saved: None,
        }
    }
}

impl<E: Copy + Eq + std::fmt::Debug> FocusReturn<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// The element captured on the last open, if the surface is open.
    pub fn saved(&self) -> Option<E> {
        self.saved
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// Apply the surface's current open state.
    ///
    /// Closed to open captures the active element. Open to closed restores
    /// focus to it when it is still attached and forgets it either way.
    /// Repeating the current state does nothing.
    pub fn update<H>(&mut self, host: &mut H, is_open: bool)
    where
        H: FocusHost<Element = E>,
    {
        if is_open == self.is_open {
            return;
        }
        self.is_open = is_open;

        if is_open {
            self.saved = host.active_element();
            tracing::trace!(target: targets::FOCUS, saved = ?self.saved, "focus captured");
            return;
        }

        match self.saved.take() {
            Some(element) if host.is_connected(element) => {
                host.focus(element);
                tracing::trace!(target: targets::FOCUS, ?element, "focus restored");
            }
            Some(element) => {
                tracing::debug!(
                    target: targets::FOCUS,
                    ?element,
                    "focus return target detached, skipping restore"
                );
            }
            None => {}
        }
    }
}
