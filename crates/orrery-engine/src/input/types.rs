use std::fmt;

/// Keyboard key identifier.
///
/// Only keys the demos react to have named variants; the runtime maps
/// everything else to `Key::Unknown` with the platform key code.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Escape,
    Space,

    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    /// Platform-dependent key not represented here.
    Unknown(u32),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyState {
    Pressed,
    Released,
}

/// Platform-agnostic input events emitted by the runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Key transition; auto-repeat arrives as further presses.
    Key { key: Key, state: KeyState },
}

impl InputEvent {
    pub fn key_pressed(key: Key) -> Self {
        Self::Key { key, state: KeyState::Pressed }
    }

    /// The key this event presses, including auto-repeated presses.
    pub fn pressed_key(&self) -> Option<Key> {
        match self {
            Self::Key { key, state: KeyState::Pressed } => Some(*key),
            Self::Key { state: KeyState::Released, .. } => None,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pressed_key_ignores_releases() {
        assert_eq!(InputEvent::key_pressed(Key::Escape).pressed_key(), Some(Key::Escape));
        assert_eq!(InputEvent::Key { key: Key::Escape, state: KeyState::Released }.pressed_key(), None);
    }
}
