//! Tab/Shift+Tab containment inside a container.

use herald_core::logging::targets;

use super::FocusHost;
use crate::keyboard::{Key, KeyPressEvent};

/// What a trapped key press did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrapAction {
    /// The key was not Tab.
    NotTab,
    /// The trap is inactive or has no container.
    Inactive,
    /// The container has nothing focusable.
    Empty,
    /// Focus was not at an edge; the host moves it normally.
    PassThrough,
    /// Tab on the last element moved focus to the first.
    WrapToFirst,
    /// Shift+Tab on the first element moved focus to the last.
    WrapToLast,
}

impl TrapAction {
    /// Whether the trap moved focus itself.
    pub fn wrapped(self) -> bool {
        matches!(self, TrapAction::WrapToFirst | TrapAction::WrapToLast)
    }
}

/// Keep Tab navigation cycling inside `container`.
///
/// Focusable descendants are computed at the time of the key press, so
/// content added or removed while the container is open is respected.
pub fn trap_focus_in_element<H: FocusHost>(
    host: &mut H,
    container: H::Element,
    event: &mut KeyPressEvent,
) -> TrapAction {
    if event.key != Key::Tab {
        return TrapAction::NotTab;
    }

    let focusable = host.focusable_descendants(container);
    let (Some(&first), Some(&last)) = (focusable.first(), focusable.last()) else {
        return TrapAction::Empty;
    };
    let active = host.active_element();

    let action = if event.modifiers.shift && active == Some(first) {
        event.prevent_default();
        host.focus(last);
        TrapAction::WrapToLast
    } else if !event.modifiers.shift && active == Some(last) {
        event.prevent_default();
        host.focus(first);
        TrapAction::WrapToFirst
    } else {
        TrapAction::PassThrough
    };

    if action.wrapped() {
        tracing::trace!(target: targets::FOCUS, ?container, ?action, "focus wrapped");
    }
    action
}

/// A focus trap bound to one container.
///
/// The trap only acts while it is both attached to a container and active,
/// matching a keydown listener that is installed only for an open surface.
#[derive(Debug, Clone)]
pub struct FocusTrap<E> {
    container: Option<E>,
    active: bool,
}

impl<E> Default for FocusTrap<E> {
    fn default() -> Self {
        Self {
            container: None,
            active: true,
        }
    }
}

impl<E: Copy + Eq + std::fmt::Debug> FocusTrap<E> {
    /// Create an active, unattached trap.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a trap with the given activity flag.
    pub fn with_active(active: bool) -> Self {
        Self {
            container: None,
            active,
        }
    }

    pub fn attach(&mut self, container: E) {
        self.container = Some(container);
    }

    pub fn detach(&mut self) {
        self.container = None;
    }

    pub fn container(&self) -> Option<E> {
        self.container
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Whether key presses are currently being handled.
    pub fn is_installed(&self) -> bool {
        self.active && self.container.is_some()
    }

    pub fn handle_key_press<H>(&self, host: &mut H, event: &mut KeyPressEvent) -> TrapAction
    where
        H: FocusHost<Element = E>,
    {
        match self.container {
            Some(container) if self.active => trap_focus_in_element(host, container, event),
            _ => TrapAction::Inactive,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::focus::{ElementId, ElementKind, ElementTree};

    fn dialog() -> (ElementTree, ElementId, [ElementId; 3]) {
        let mut tree = ElementTree::new();
        let root = tree.add_root(ElementKind::Generic);
        let a = tree.add_child(root, ElementKind::Button).unwrap();
        let b = tree.add_child(root, ElementKind::Input).unwrap();
        let c = tree.add_child(root, ElementKind::Button).unwrap();
        (tree, root, [a, b, c])
    }

    #[test]
    fn test_tab_on_last_wraps() {
        let (mut tree, root, [a, _, c]) = dialog();
        tree.focus(c);
        let mut event = KeyPressEvent::tab();

        let action = trap_focus_in_element(&mut tree, root, &mut event);
        assert_eq!(action, TrapAction::WrapToFirst);
        assert!(event.is_default_prevented());
        assert_eq!(tree.active_element(), Some(a));
    }

    #[test]
    fn test_shift_tab_on_first_wraps() {
        let (mut tree, root, [a, _, c]) = dialog();
        tree.focus(a);
        let mut event = KeyPressEvent::shift_tab();

        let action = trap_focus_in_element(&mut tree, root, &mut event);
        assert_eq!(action, TrapAction::WrapToLast);
        assert!(event.is_default_prevented());
        assert_eq!(tree.active_element(), Some(c));
    }

    #[test]
    fn test_middle_passes_through() {
        let (mut tree, root, [_, b, _]) = dialog();
        tree.focus(b);
        for mut event in [KeyPressEvent::tab(), KeyPressEvent::shift_tab()] {
            let action = trap_focus_in_element(&mut tree, root, &mut event);
            assert_eq!(action, TrapAction::PassThrough);
            assert!(!event.is_default_prevented());
            assert_eq!(tree.active_element(), Some(b));
        }
    }

    #[test]
    fn test_non_tab_ignored() {
        let (mut tree, root, [_, _, c]) = dialog();
        tree.focus(c);
        let mut event = KeyPressEvent::new(Key::Enter, Default::default());
        assert_eq!(
            trap_focus_in_element(&mut tree, root, &mut event),
            TrapAction::NotTab
        );
        assert_eq!(tree.active_element(), Some(c));
    }

    #[test]
    fn test_empty_container() {
        let mut tree = ElementTree::new();
        let root = tree.add_root(ElementKind::Generic);
        tree.add_child(root, ElementKind::Generic);
        let mut event = KeyPressEvent::tab();
        assert_eq!(
            trap_focus_in_element(&mut tree, root, &mut event),
            TrapAction::Empty
        );
        assert!(!event.is_default_prevented());
    }

    #[test]
    fn test_single_element_wraps_to_itself() {
        let mut tree = ElementTree::new();
        let root = tree.add_root(ElementKind::Generic);
        let only = tree.add_child(root, ElementKind::Button).unwrap();
        tree.focus(only);

        let mut event = KeyPressEvent::tab();
        assert_eq!(
            trap_focus_in_element(&mut tree, root, &mut event),
            TrapAction::WrapToFirst
        );
        assert_eq!(tree.active_element(), Some(only));
    }

    #[test]
    fn test_inactive_trap_does_nothing() {
        let (mut tree, root, [_, _, c]) = dialog();
        tree.focus(c);

        let mut trap = FocusTrap::with_active(false);
        trap.attach(root);
        assert!(!trap.is_installed());
        let mut event = KeyPressEvent::tab();
        assert_eq!(trap.handle_key_press(&mut tree, &mut event), TrapAction::Inactive);

        let unattached: FocusTrap<ElementId> = FocusTrap::new();
        assert_eq!(
            unattached.handle_key_press(&mut tree, &mut event),
            TrapAction::Inactive
        );
        assert_eq!(tree.active_element(), Some(c));
    }

    #[test]
    fn test_activation_toggles_listener() {
        let (mut tree, root, [a, _, c]) = dialog();
        let mut trap = FocusTrap::new();
        trap.attach(root);
        assert!(trap.is_installed());

        tree.focus(c);
        let mut event = KeyPressEvent::tab();
        assert_eq!(trap.handle_key_press(&mut tree, &mut event), TrapAction::WrapToFirst);
        assert_eq!(tree.active_element(), Some(a));

        trap.set_active(false);
        trap.detach();
        assert!(!trap.is_installed());
        assert_eq!(trap.container(), None);
    }
}
