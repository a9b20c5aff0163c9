//! The scene: every resource the demo renders, plus the per-frame update and draw.
//!
//! A scene moves through three phases. While [`ScenePhase::Initializing`] resources are
//! registered by name; [`Scene::start`] checks that every object's references resolve and
//! switches to [`ScenePhase::Running`]; a close request or [`Scene::shutdown`] ends in
//! [`ScenePhase::ShuttingDown`], where everything is released newest first.

mod loader;
mod registry;

use std::sync::Arc;

use glam::{Vec3, Vec4};

use crate::{
    abs::{Material, Mesh, ShaderProgram, Texture},
    camera::{Camera, Direction, Projection},
    config::Controls,
    error::{Error, Result},
    gpu::Gpu,
    input::{Key, UpdateContext},
};

pub use registry::Registry;

/// Smallest scale the Z key shrinks a mesh to.
const MIN_SCALE: f32 = 0.05;

const MOVE_KEYS: [(Key, Direction); 4] = [
    (Key::W, Direction::Forward),
    (Key::S, Direction::Backward),
    (Key::A, Direction::Left),
    (Key::D, Direction::Right),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenePhase {
    Initializing,
    Running,
    ShuttingDown,
}

/// A mesh and the names of the resources it is drawn with.
pub struct SceneObject<G: Gpu> {
    pub mesh: Mesh<G>,
    material: String,
    shader: String,
    textures: Vec<String>,
}

impl<G: Gpu> SceneObject<G> {
    pub fn new(mesh: Mesh<G>, material: impl Into<String>, shader: impl Into<String>) -> Self {
        Self {
            mesh,
            material: material.into(),
            shader: shader.into(),
            textures: Vec::new(),
        }
    }

    /// Textures bound around the draw, in order.
    pub fn with_textures<S: Into<String>>(mut self, textures: impl IntoIterator<Item = S>) -> Self {
        self.textures = textures.into_iter().map(Into::into).collect();
        self
    }

    pub fn material(&self) -> &str {
        &self.material
    }

    pub fn shader(&self) -> &str {
        &self.shader
    }

    pub fn textures(&self) -> &[String] {
        &self.textures
    }
}

pub struct Scene<G: Gpu> {
    gl: Arc<G>,
    phase: ScenePhase,
    camera: Camera,
    projection: Projection,
    light_position: Vec3,
    clear_colour: Vec4,
    controls: Controls,
    shaders: Registry<ShaderProgram<G>>,
    textures: Registry<Texture<G>>,
    materials: Registry<Material>,
    objects: Registry<SceneObject<G>>,
}

impl<G: Gpu> Scene<G> {
    pub fn new(gl: &Arc<G>, camera: Camera, projection: Projection, light_position: Vec3) -> Self {
        Self {
            gl: Arc::clone(gl),
            phase: ScenePhase::Initializing,
            camera,
            projection,
            light_position,
            clear_colour: Vec4::new(0.0, 0.0, 0.0, 1.0),
            controls: Controls::default(),
            shaders: Registry::new("shader"),
            textures: Registry::new("texture"),
            materials: Registry::new("material"),
            objects: Registry::new("object"),
        }
    }

    pub fn with_clear_colour(mut self, colour: Vec4) -> Self {
        self.clear_colour = colour;
        self
    }

    pub fn with_controls(mut self, controls: Controls) -> Self {
        self.controls = controls;
        self
    }

    fn ensure_initializing(&self) -> Result<()> {
        match self.phase {
            ScenePhase::Initializing => Ok(()),
            phase => Err(Error::Config(format!(
                "resources can only be added while initializing (scene is {phase:?})"
            ))),
        }
    }

    pub fn add_shader(&mut self, name: impl Into<String>, program: ShaderProgram<G>) -> Result<()> {
        self.ensure_initializing()?;
        self.shaders.insert(name, program)
    }

    pub fn add_texture(&mut self, name: impl Into<String>, texture: Texture<G>) -> Result<()> {
        self.ensure_initializing()?;
        self.textures.insert(name, texture)
    }

    pub fn add_material(&mut self, name: impl Into<String>, material: Material) -> Result<()> {
        self.ensure_initializing()?;
        self.materials.insert(name, material)
    }

    pub fn add_object(&mut self, name: impl Into<String>, object: SceneObject<G>) -> Result<()> {
        self.ensure_initializing()?;
        self.objects.insert(name, object)
    }

    /// Checks every reference, sets up the pipeline state and enters the running phase.
    pub fn start(&mut self) -> Result<()> {
        self.ensure_initializing()?;
        if self.shaders.is_empty() {
            return Err(Error::Config("a scene needs at least one shader program".to_string()));
        }
        for (_, object) in self.objects.iter() {
            self.shaders.get(&object.shader)?;
            self.materials.get(&object.material)?;
            for texture in &object.textures {
                self.textures.get(texture)?;
            }
        }

        self.gl.configure_pipeline();
        self.phase = ScenePhase::Running;
        log::info!(
            "scene running: {} shaders, {} textures, {} materials, {} objects",
            self.shaders.len(),
            self.textures.len(),
            self.materials.len(),
            self.objects.len()
        );
        Ok(())
    }

    /// Applies one frame of input. Returns `false` once the scene has stopped running.
    pub fn update(&mut self, ctx: &UpdateContext) -> bool {
        if self.phase != ScenePhase::Running {
            return false;
        }
        if ctx.close_requested || ctx.keyboard.is_down(Key::Escape) {
            log::info!("close requested");
            self.phase = ScenePhase::ShuttingDown;
            return false;
        }

        let dt = ctx.delta_time;
        for (key, direction) in MOVE_KEYS {
            if ctx.keyboard.is_down(key) {
                self.camera.move_in(dt, direction);
            }
        }
        let mut look = ctx.mouse.look_offset();
        if self.controls.invert_y {
            look.y = -look.y;
        }
        self.camera.look(look.x, look.y, true);

        let controls = self.controls;
        if let Some(object) = self.objects.first_mut() {
            let mesh = &mut object.mesh;
            let mut rotation = mesh.rotation();
            if ctx.keyboard.is_down(Key::Q) {
                rotation.y -= controls.rotate_speed * dt;
            }
            if ctx.keyboard.is_down(Key::E) {
                rotation.y += controls.rotate_speed * dt;
            }
            mesh.set_rotation(rotation);

            let mut scale = mesh.scale();
            if ctx.keyboard.is_down(Key::Z) {
                scale -= Vec3::splat(controls.scale_speed * dt);
            }
            if ctx.keyboard.is_down(Key::X) {
                scale += Vec3::splat(controls.scale_speed * dt);
            }
            mesh.set_scale(scale.max(Vec3::splat(MIN_SCALE)));
        }

        true
    }

    /// Draws one frame into a framebuffer of `(width, height)` pixels.
    pub fn render(&self, (width, height): (u32, u32)) -> Result<()> {
        if self.phase != ScenePhase::Running {
            return Err(Error::NotRunning);
        }

        self.gl.clear_frame(self.clear_colour);

        let view = self.camera.view_matrix();
        let projection = self.projection.matrix(width, height);
        for program in self.shaders.values() {
            program.set_uniform("view_matrix", view);
            program.set_uniform("projection_matrix", projection);
            program.set_uniform("camera_position", self.camera.position());
            program.set_uniform("light_position", self.light_position);
        }

        for (name, object) in self.objects.iter() {
            log::trace!("drawing '{name}'");
            let program = self.shaders.get(&object.shader)?;
            self.materials.get(&object.material)?.send_to_shader(program);

            let textures = object
                .textures
                .iter()
                .map(|texture| self.textures.get(texture))
                .collect::<Result<Vec<_>>>()?;
            for texture in &textures {
                texture.bind();
            }
            object.mesh.render(program);
            for texture in &textures {
                texture.unbind();
            }
        }

        self.gl.bind_vertex_array(None);
        self.gl.bind_program(None);
        self.gl.bind_texture(0, None);
        Ok(())
    }

    /// Matches the viewport to a resized framebuffer.
    pub fn resize(&self, width: u32, height: u32) {
        self.gl.set_viewport(width as i32, height as i32);
    }

    /// Releases every resource, newest first. Safe to call more than once.
    pub fn shutdown(&mut self) {
        if self.phase != ScenePhase::ShuttingDown {
            log::info!("shutting down scene");
        }
        self.phase = ScenePhase::ShuttingDown;
        self.objects.release_all();
        self.materials.release_all();
        self.textures.release_all();
        self.shaders.release_all();
    }

    pub fn phase(&self) -> ScenePhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == ScenePhase::Running
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn light_position(&self) -> Vec3 {
        self.light_position
    }

    pub fn set_light_position(&mut self, position: Vec3) {
        self.light_position = position;
    }

    pub fn object(&self, name: &str) -> Result<&SceneObject<G>> {
        self.objects.get(name)
    }

    pub fn object_mut(&mut self, name: &str) -> Result<&mut SceneObject<G>> {
        self.objects.get_mut(name)
    }

    pub fn shader(&self, name: &str) -> Result<&ShaderProgram<G>> {
        self.shaders.get(name)
    }

    pub fn texture(&self, name: &str) -> Result<&Texture<G>> {
        self.textures.get(name)
    }

    pub fn material(&self, name: &str) -> Result<&Material> {
        self.materials.get(name)
    }
}

impl<G: Gpu> Drop for Scene<G> {
    fn drop(&mut self) {
        self.shutdown();
    }
}
