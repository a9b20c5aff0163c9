use std::{
    path::{Path, PathBuf},
    process::ExitCode,
    time::Instant,
};

use glam::Vec2;
use phong3d_core::{
    Scene,
    config::SceneConfig,
    error::Result,
    input::{KeyboardState, MouseState, UpdateContext},
};
use sdl2::event::{Event, WindowEvent};

use crate::app::App;

mod app;
mod input;
mod logging;

/// Where the built-in scene finds its assets: the working directory when it has an
/// `assets/` folder, otherwise the client crate itself.
fn default_asset_dir() -> PathBuf {
    if Path::new("assets").is_dir() {
        PathBuf::from(".")
    } else {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
    }
}

fn run() -> Result<()> {
    let (config, base_dir) = SceneConfig::load_or_default(&default_asset_dir())?;

    let mut app = App::new(&config.window)?;
    let mut scene = Scene::from_config(&app.gl, &config, &base_dir)?;
    let (width, height) = app.drawable_size();
    scene.resize(width, height);
    app.capture_mouse();

    let mut keyboard_state = KeyboardState::default();
    let mut mouse_state = MouseState::default();
    let mut last_frame_time = Instant::now();

    loop {
        let now = Instant::now();
        let delta_time = now.duration_since(last_frame_time).as_secs_f32();
        last_frame_time = now;

        keyboard_state.begin_frame();
        mouse_state.begin_frame();
        let mut close_requested = false;

        for event in app.event_pump.poll_iter() {
            match event {
                Event::Quit { .. } => close_requested = true,
                Event::Window {
                    win_event: WindowEvent::SizeChanged(..),
                    ..
                } => {
                    let (width, height) = app.window.drawable_size();
                    scene.resize(width, height);
                }
                Event::MouseMotion {
                    x, y, xrel, yrel, ..
                } => {
                    mouse_state.motion(
                        Vec2::new(x as f32, y as f32),
                        Vec2::new(xrel as f32, yrel as f32),
                    );
                }
                Event::KeyDown {
                    keycode: Some(keycode),
                    repeat: false,
                    ..
                } => {
                    if let Some(key) = input::map_keycode(keycode) {
                        keyboard_state.key_down(key);
                    }
                }
                Event::KeyUp {
                    keycode: Some(keycode),
                    repeat: false,
                    ..
                } => {
                    if let Some(key) = input::map_keycode(keycode) {
                        keyboard_state.key_up(key);
                    }
                }
                _ => {}
            }
        }

        let update_ctx = UpdateContext::new(&keyboard_state, &mouse_state, delta_time)
            .with_close_requested(close_requested);
        if !scene.update(&update_ctx) {
            break;
        }

        scene.render(app.drawable_size())?;
        app.window.gl_swap_window();
    }

    scene.shutdown();
    Ok(())
}

fn main() -> ExitCode {
    if let Err(err) = logging::init() {
        eprintln!("could not set up logging: {err}");
    }

    match run() {
        Ok(()) => {
            log::info!("bye");
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
