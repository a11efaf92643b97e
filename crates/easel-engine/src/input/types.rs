use std::fmt;

/// Logical keyboard key.
///
/// Printable keys arrive as the character the layout produced, so `Shift+a`
/// is `Character('A')`. Everything else is a named key.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Character(char),

    Escape,
    Enter,
    Tab,
    Backspace,
    Space,
    Delete,
    Home,
    End,

    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    Shift,
    Control,
    Alt,
    Meta,

    /// Function key `F1`..`F24`.
    Function(u8),

    /// Key the platform could not name.
    Unidentified,
}

impl Key {
    #[inline]
    pub fn char(c: char) -> Self {
        Key::Character(c)
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyState {
    Pressed,
    Released,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Back,
    Forward,
    Other(u16),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum MouseButtonState {
    Pressed,
    Released,
}

/// Platform-agnostic input events emitted by the runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Pointer position in surface pixels.
    PointerMoved { x: f32, y: f32 },
    PointerButton {
        button: MouseButton,
        state: MouseButtonState,
    },
    PointerLeft,
    Key {
        key: Key,
        state: KeyState,
        /// Platform auto-repeat flag. Informational; repeat suppression is
        /// done by [`InputState`] itself.
        repeat: bool,
    },
    Focused(bool),
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Character(c) => write!(f, "{c}"),
            Key::Function(n) => write!(f, "F{n}"),
            other => write!(f, "{other:?}"),
        }
    }
}
