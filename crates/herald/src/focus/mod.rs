//! Keyboard focus containment and restoration for modal surfaces.
//!
//! Herald does not own a document. Everything it needs from the platform goes
//! through [`FocusHost`]: enumerating focusable descendants, reading the
//! active element and moving focus. [`ElementTree`] is an in-memory host
//! used by tests and headless renderers.
//!
//! # Tab order
//!
//! Hosts must return focusable descendants in tab order. For [`ElementTree`]
//! that is depth-first pre-order, the same order elements appear in the
//! document.

mod restore;
mod trap;
mod tree;

pub use restore::FocusReturn;
pub use trap::{FocusTrap, TrapAction, trap_focus_in_element};
pub use tree::{ElementId, ElementKind, ElementTree};

use std::fmt::Debug;

/// Platform focus capability.
pub trait FocusHost {
    /// Handle to an element in the host's document.
    type Element: Copy + Eq + Debug;

    /// Focusable descendants of `container`, in tab order.
    fn focusable_descendants(&self, container: Self::Element) -> Vec<Self::Element>;

    /// The element that currently has focus, if any.
    fn active_element(&self) -> Option<Self::Element>;

    /// Move focus to `element`.
    fn focus(&mut self, element: Self::Element);

    /// Whether `element` is still attached to the document.
    fn is_connected(&self, element: Self::Element) -> bool;
}
