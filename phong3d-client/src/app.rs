//! SDL2 and OpenGL application management.
//!
//! This module defines the [`App`] struct which encapsulates the SDL2 window and the OpenGL
//! context the scene renders into.

use std::sync::Arc;

use phong3d_core::{
    config::WindowConfig,
    error::{Error, Result},
};

fn init_error(err: impl std::fmt::Display) -> Error {
    Error::Init(err.to_string())
}

/// The [`App`] struct encapsulates the SDL2 and OpenGL context.
pub struct App {
    pub sdl: sdl2::Sdl,
    pub video_subsystem: sdl2::VideoSubsystem,
    pub window: sdl2::video::Window,
    pub gl_context: sdl2::video::GLContext,
    pub gl: Arc<glow::Context>,
    pub event_pump: sdl2::EventPump,
}

impl App {
    /// Opens a window with a core-profile context of the requested version and makes it
    /// current.
    pub fn new(config: &WindowConfig) -> Result<Self> {
        let sdl = sdl2::init().map_err(init_error)?;
        let video_subsystem = sdl.video().map_err(init_error)?;
        let gl_attr = video_subsystem.gl_attr();
        gl_attr.set_context_profile(sdl2::video::GLProfile::Core);
        gl_attr.set_context_version(config.gl_major, config.gl_minor);
        gl_attr.set_depth_size(24);
        gl_attr.set_stencil_size(8);

        let mut builder = video_subsystem.window(&config.title, config.width, config.height);
        builder.opengl().position_centered();
        if config.resizable {
            builder.resizable();
        }
        let window = builder.build().map_err(init_error)?;

        let gl_context = window.gl_create_context().map_err(init_error)?;
        window.gl_make_current(&gl_context).map_err(init_error)?;
        // Swap on vblank where the driver allows it; a failure just means uncapped frames.
        if let Err(err) = video_subsystem.gl_set_swap_interval(sdl2::video::SwapInterval::VSync) {
            log::warn!("vsync unavailable: {err}");
        }

        let gl = unsafe {
            glow::Context::from_loader_function(|s| {
                video_subsystem.gl_get_proc_address(s) as *const _
            })
        };
        let event_pump = sdl.event_pump().map_err(init_error)?;
        let gl = Arc::new(gl);

        log::info!(
            "opened {}x{} window with OpenGL {}.{} core",
            config.width,
            config.height,
            config.gl_major,
            config.gl_minor
        );

        Ok(Self {
            sdl,
            video_subsystem,
            window,
            gl_context,
            gl,
            event_pump,
        })
    }

    /// Hides the cursor and reports relative motion only, for mouse look.
    pub fn capture_mouse(&self) {
        self.sdl.mouse().set_relative_mouse_mode(true);
    }

    pub fn drawable_size(&self) -> (u32, u32) {
        self.window.drawable_size()
    }
}
