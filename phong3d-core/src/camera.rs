//! First-person fly camera driven by yaw and pitch.

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

pub const DEFAULT_MOVE_SPEED: f32 = 2.5;
pub const DEFAULT_LOOK_SENSITIVITY: f32 = 0.1;
pub const PITCH_LIMIT: f32 = 89.0;

/// A planar movement command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Forward,
    Backward,
    Left,
    Right,
}

/// The camera owns its angles; `front`, `right` and `up` are always derived from them.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    position: Vec3,
    front: Vec3,
    up: Vec3,
    right: Vec3,
    world_up: Vec3,
    yaw: f32,
    pitch: f32,
    pub move_speed: f32,
    pub look_sensitivity: f32,
}

impl Camera {
    /// Creates a camera at `position` looking down -Z (yaw -90°, pitch 0°).
    pub fn new(position: Vec3, world_up: Vec3) -> Self {
        let mut camera = Self {
            position,
            front: Vec3::NEG_Z,
            up: world_up,
            right: Vec3::ZERO,
            world_up,
            yaw: -90.0,
            pitch: 0.0,
            move_speed: DEFAULT_MOVE_SPEED,
            look_sensitivity: DEFAULT_LOOK_SENSITIVITY,
        };
        camera.update_vectors();
        camera
    }

    pub fn with_speeds(mut self, move_speed: f32, look_sensitivity: f32) -> Self {
        self.move_speed = move_speed;
        self.look_sensitivity = look_sensitivity;
        self
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front, self.up)
    }

    /// Moves along `front` or `right` by `move_speed * delta_time`.
    ///
    /// Each call is independent, so holding two keys moves faster diagonally.
    pub fn move_in(&mut self, delta_time: f32, direction: Direction) {
        let velocity = self.move_speed * delta_time;
        match direction {
            Direction::Forward => self.position += self.front * velocity,
            Direction::Backward => self.position -= self.front * velocity,
            Direction::Left => self.position -= self.right * velocity,
            Direction::Right => self.position += self.right * velocity,
        }
    }

    /// Turns the camera by a cursor offset, scaled by `look_sensitivity`.
    pub fn look(&mut self, x_offset: f32, y_offset: f32, constrain_pitch: bool) {
        self.yaw += x_offset * self.look_sensitivity;
        self.pitch += y_offset * self.look_sensitivity;

        if constrain_pitch {
            self.pitch = self.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        }

        self.update_vectors();
    }

    fn update_vectors(&mut self) {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        self.front = Vec3::new(yaw.cos() * pitch.cos(), pitch.sin(), yaw.sin() * pitch.cos())
            .normalize();
        self.right = self.front.cross(self.world_up).normalize();
        self.up = self.right.cross(self.front).normalize();
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub fn front(&self) -> Vec3 {
        self.front
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }
}

/// Perspective projection parameters; the aspect ratio comes from the framebuffer each frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Projection {
    /// Vertical field of view in degrees.
    pub fov: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            fov: 90.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl Projection {
    pub fn matrix(&self, width: u32, height: u32) -> Mat4 {
        let aspect = width.max(1) as f32 / height.max(1) as f32;
        Mat4::perspective_rh_gl(self.fov.to_radians(), aspect, self.near, self.far)
    }
}
