//! Input events delivered through the tree.

use crate::geom::Point;

/// Mouse buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary button.
    Left,
    /// Secondary button.
    Right,
    /// Middle button or wheel click.
    Middle,
}

/// Keys that can appear in a gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// A printable character.
    Char(char),
    /// Enter.
    Enter,
    /// Tab.
    Tab,
    /// Escape.
    Escape,
    /// Backspace.
    Backspace,
    /// Delete.
    Delete,
    /// Up arrow.
    Up,
    /// Down arrow.
    Down,
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
    /// Home.
    Home,
    /// End.
    End,
    /// Page up.
    PageUp,
    /// Page down.
    PageDown,
    /// Function key.
    F(u8),
}

/// Modifier keys held during a gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    /// Control.
    pub ctrl: bool,
    /// Alt or option.
    pub alt: bool,
    /// Shift.
    pub shift: bool,
    /// Meta, command or super.
    pub meta: bool,
}

impl Modifiers {
    /// No modifiers.
    pub fn none() -> Self {
        Self::default()
    }

    /// Control only.
    pub fn ctrl() -> Self {
        Self {
            ctrl: true,
            ..Self::default()
        }
    }
}

/// A key with modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyGesture {
    /// The key.
    pub key: Key,
    /// Held modifiers.
    pub modifiers: Modifiers,
}

impl KeyGesture {
    /// Construct a gesture.
    pub fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }
}

impl From<Key> for KeyGesture {
    fn from(key: Key) -> Self {
        Self::new(key, Modifiers::none())
    }
}

impl From<char> for KeyGesture {
    fn from(c: char) -> Self {
        Key::Char(c).into()
    }
}

/// A gesture bound to a named command.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InputBinding {
    /// Triggering gesture.
    pub gesture: KeyGesture,
    /// Command name.
    pub command: String,
}

impl InputBinding {
    /// Bind `gesture` to `command`.
    pub fn new(gesture: impl Into<KeyGesture>, command: impl Into<String>) -> Self {
        Self {
            gesture: gesture.into(),
            command: command.into(),
        }
    }
}

/// An input notification.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Key pressed.
    KeyDown(KeyGesture),
    /// Key released.
    KeyUp(KeyGesture),
    /// Character input.
    KeyPress(char),
    /// Mouse button pressed.
    MouseDown {
        /// Button.
        button: MouseButton,
        /// Position in the target's coordinates.
        position: Point,
    },
    /// Mouse button released.
    MouseUp {
        /// Button.
        button: MouseButton,
        /// Position in the target's coordinates.
        position: Point,
    },
    /// Pointer moved.
    MouseMove {
        /// Position in the target's coordinates.
        position: Point,
    },
    /// Wheel scrolled.
    MouseWheel {
        /// Scroll amount; positive is away from the user.
        delta: f64,
        /// Position in the target's coordinates.
        position: Point,
    },
    /// Application-defined event.
    Custom(String),
}

impl Event {
    /// The key gesture, for key events.
    pub fn gesture(&self) -> Option<KeyGesture> {
        match self {
            Self::KeyDown(g) | Self::KeyUp(g) => Some(*g),
            _ => None,
        }
    }
}
