use sdl2::keyboard::Keycode;

use phong3d_core::input::Key;

/// Maps an SDL keycode onto the keys the scene listens for.
pub fn map_keycode(keycode: Keycode) -> Option<Key> {
    let key = match keycode {
        Keycode::W => Key::W,
        Keycode::A => Key::A,
        Keycode::S => Key::S,
        Keycode::D => Key::D,
        Keycode::Q => Key::Q,
        Keycode::E => Key::E,
        Keycode::Z => Key::Z,
        Keycode::X => Key::X,
        Keycode::Escape => Key::Escape,
        _ => return None,
    };
    Some(key)
}
