//! Modal surfaces: focus trap, focus return and Escape-to-close together.

use herald_core::logging::{span_names, targets};
use herald_core::{PerfSpan, Signal};

use crate::focus::{FocusHost, FocusReturn, FocusTrap, TrapAction};
use crate::keyboard::{KeyPressEvent, handle_escape_key};

/// What a key press did to an open surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceKeyAction {
    /// The surface is closed; the key was not looked at.
    Ignored,
    /// Escape closed the surface.
    Closed,
    /// The key went to the focus trap.
    Trap(TrapAction),
}

/// A dialog or overlay that owns keyboard focus while open.
///
/// Opening remembers the element that had focus and moves focus to the first
/// focusable element inside the container. While open, Tab cycles inside the
/// container and Escape closes the surface. Closing gives focus back.
#[derive(Debug)]
pub struct ModalSurface<E> {
    container: E,
    trap: FocusTrap<E>,
    focus_return: FocusReturn<E>,
    is_open: bool,
    closed: Signal<()>,
}

impl<E: Copy + Eq + std::fmt::Debug> ModalSurface<E> {
    pub fn new(container: E) -> Self {
        let mut trap = FocusTrap::with_active(false);
        trap.attach(container);
        Self {
            container,
            trap,
            focus_return: FocusReturn::new(),
            is_open: false,
            closed: Signal::new(),
        }
    }

    pub fn container(&self) -> E {
        self.container
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// Emitted each time the surface closes, including via Escape.
    pub fn closed(&self) -> &Signal<()> {
        &self.closed
    }

    pub fn open<H>(&mut self, host: &mut H)
    where
        H: FocusHost<Element = E>,
    {
        if self.is_open {
            return;
        }
        self.is_open = true;
        self.focus_return.update(host, true);
        self.trap.set_active(true);

        if let Some(&first) = host.focusable_descendants(self.container).first() {
            host.focus(first);
        }
        tracing::debug!(target: targets::FEEDBACK, container = ?self.container, "surface opened");
    }

    pub fn close<H>(&mut self, host: &mut H)
    where
        H: FocusHost<Element = E>,
    {
        if !self.is_open {
            return;
        }
        self.is_open = false;
        self.trap.set_active(false);
        self.focus_return.update(host, false);
        tracing::debug!(target: targets::FEEDBACK, container = ?self.container, "surface closed");
        self.closed.emit(());
    }

    pub fn handle_key_press<H>(&mut self, host: &mut H, event: &mut KeyPressEvent) -> SurfaceKeyAction
    where
        H: FocusHost<Element = E>,
    {
        if !self.is_open {
            return SurfaceKeyAction::Ignored;
        }
        let _span = PerfSpan::new(span_names::FOCUS_TRAP);

        if handle_escape_key(event, || self.close(host)) {
            return SurfaceKeyAction::Closed;
        }
        SurfaceKeyAction::Trap(self.trap.handle_key_press(host, event))
    }
}
