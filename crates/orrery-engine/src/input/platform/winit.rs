use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::input::{InputEvent, Key, KeyState};

/// Translates a winit `WindowEvent` into an engine `InputEvent`.
///
/// Returns `None` for events not represented by the input subsystem.
pub(crate) fn translate_window_event(event: &WindowEvent) -> Option<InputEvent> {
    let WindowEvent::KeyboardInput { event, .. } = event else {
        return None;
    };

    let state = match event.state {
        ElementState::Pressed => KeyState::Pressed,
        ElementState::Released => KeyState::Released,
    };
    Some(InputEvent::Key { key: map_key(event.physical_key), state })
}

fn map_key(pk: PhysicalKey) -> Key {
    match pk {
        PhysicalKey::Code(code) => map_key_code(code),
        // NativeKeyCode has no stable numeric form.
        PhysicalKey::Unidentified(_) => Key::Unknown(0),
    }
}

fn map_key_code(code: KeyCode) -> Key {
    match code {
        KeyCode::Escape => Key::Escape,
        KeyCode::Space => Key::Space,

        KeyCode::ArrowUp => Key::ArrowUp,
        KeyCode::ArrowDown => Key::ArrowDown,
        KeyCode::ArrowLeft => Key::ArrowLeft,
        KeyCode::ArrowRight => Key::ArrowRight,

        other => Key::Unknown(other as u32),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrows_and_space_are_named() {
        assert_eq!(map_key_code(KeyCode::Space), Key::Space);
        assert_eq!(map_key_code(KeyCode::ArrowLeft), Key::ArrowLeft);
        assert_eq!(map_key_code(KeyCode::Escape), Key::Escape);
    }

    #[test]
    fn other_keys_keep_their_code() {
        let code = KeyCode::KeyQ;
        assert_eq!(map_key(PhysicalKey::Code(code)), Key::Unknown(code as u32));
    }

    #[test]
    fn non_keyboard_events_are_dropped() {
        assert_eq!(translate_window_event(&WindowEvent::Focused(true)), None);
    }
}
