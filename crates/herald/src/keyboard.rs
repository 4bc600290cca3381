//! Keyboard events as seen by the focus and dialog helpers.
//!
//! Hosts translate their native key events into a [`KeyPressEvent`], hand it
//! to the helpers, then check [`KeyPressEvent::is_default_prevented`] to see
//! whether the native default action must be suppressed.

/// Keyboard modifiers held during a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct KeyboardModifiers {
    pub shift: bool,
    /// Control (Cmd on macOS).
    pub control: bool,
    pub alt: bool,
    pub meta: bool,
}

impl KeyboardModifiers {
    /// No modifiers pressed.
    pub const NONE: Self = Self {
        shift: false,
        control: false,
        alt: false,
        meta: false,
    };

    /// Shift modifier only.
    pub const SHIFT: Self = Self {
        shift: true,
        control: false,
        alt: false,
        meta: false,
    };

    /// Check if any modifier is pressed.
    pub fn any(&self) -> bool {
        self.shift || self.control || self.alt || self.meta
    }
}

/// Logical keys the accessibility helpers care about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Tab,
    Escape,
    Enter,
    Space,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Home,
    End,
    /// A printable character.
    Character(char),
    /// Any key without a dedicated variant.
    Unidentified,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value to a key.
    pub fn from_name(name: &str) -> Self {
        match name {
            "Tab" => Key::Tab,
            "Escape" | "Esc" => Key::Escape,
            "Enter" => Key::Enter,
            " " | "Spacebar" => Key::Space,
            "ArrowUp" => Key::ArrowUp,
            "ArrowDown" => Key::ArrowDown,
            "ArrowLeft" => Key::ArrowLeft,
            "ArrowRight" => Key::ArrowRight,
            "Home" => Key::Home,
            "End" => Key::End,
            _ => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::Character(c),
                    _ => Key::Unidentified,
                }
            }
        }
    }
}

/// A key press delivered to a focus or dialog handler.
#[derive(Debug, Clone)]
pub struct KeyPressEvent {
    pub key: Key,
    pub modifiers: KeyboardModifiers,
    default_prevented: bool,
}

impl KeyPressEvent {
    pub fn new(key: Key, modifiers: KeyboardModifiers) -> Self {
        Self {
            key,
            modifiers,
            default_prevented: false,
        }
    }

    /// A plain Tab press.
    pub fn tab() -> Self {
        Self::new(Key::Tab, KeyboardModifiers::NONE)
    }

    /// Shift+Tab.
    pub fn shift_tab() -> Self {
        Self::new(Key::Tab, KeyboardModifiers::SHIFT)
    }

    /// Suppress the host's default handling of this key.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }
}

fn handle_key<F: FnOnce()>(event: &mut KeyPressEvent, key: Key, callback: F) -> bool {
    if event.key != key {
        return false;
    }
    event.prevent_default();
    callback();
    true
}

/// Run `callback` if `event` is Escape. Returns whether it ran.
pub fn handle_escape_key<F: FnOnce()>(event: &mut KeyPressEvent, callback: F) -> bool {
    handle_key(event, Key::Escape, callback)
}

/// Run `callback` if `event` is Enter. Returns whether it ran.
pub fn handle_enter_key<F: FnOnce()>(event: &mut KeyPressEvent, callback: F) -> bool {
    handle_key(event, Key::Enter, callback)
}
