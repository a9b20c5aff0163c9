//! Platform-agnostic input state fed to the scene once per frame.

use std::collections::HashSet;

use glam::Vec2;

/// The keys the demo reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    W,
    A,
    S,
    D,
    Q,
    E,
    Z,
    X,
    Escape,
}

/// The current state of the keyboard.
#[derive(Debug, Default)]
pub struct KeyboardState {
    pub down: HashSet<Key>,
    pub pressed: HashSet<Key>,
    pub released: HashSet<Key>,
}

impl KeyboardState {
    /// Forgets the per-frame transitions, keeping held keys.
    pub fn begin_frame(&mut self) {
        self.pressed.clear();
        self.released.clear();
    }

    pub fn key_down(&mut self, key: Key) {
        if self.down.insert(key) {
            self.pressed.insert(key);
        }
    }

    pub fn key_up(&mut self, key: Key) {
        if self.down.remove(&key) {
            self.released.insert(key);
        }
    }

    pub fn is_down(&self, key: Key) -> bool {
        self.down.contains(&key)
    }
}

/// The current state of the mouse.
///
/// The very first motion is dropped: it carries the jump from wherever the cursor was
/// before the window grabbed it.
#[derive(Debug, Default)]
pub struct MouseState {
    pub position: Vec2,
    pub delta: Vec2,
    primed: bool,
}

impl MouseState {
    pub fn begin_frame(&mut self) {
        self.delta = Vec2::ZERO;
    }

    pub fn motion(&mut self, position: Vec2, relative: Vec2) {
        self.position = position;
        if !self.primed {
            self.primed = true;
            return;
        }
        self.delta += relative;
    }

    /// Cursor movement as a look offset, passed through unchanged: moving the cursor down
    /// (window y grows downwards) raises pitch.
    pub fn look_offset(&self) -> Vec2 {
        self.delta
    }
}

/// Context provided to the scene during the update phase.
pub struct UpdateContext<'a> {
    pub keyboard: &'a KeyboardState,
    pub mouse: &'a MouseState,
    pub delta_time: f32,
    /// The window asked to close this frame.
    pub close_requested: bool,
}

impl<'a> UpdateContext<'a> {
    pub fn new(keyboard: &'a KeyboardState, mouse: &'a MouseState, delta_time: f32) -> Self {
        Self {
            keyboard,
            mouse,
            delta_time,
            close_requested: false,
        }
    }

    pub fn with_close_requested(mut self, close_requested: bool) -> Self {
        self.close_requested = close_requested;
        self
    }
}
