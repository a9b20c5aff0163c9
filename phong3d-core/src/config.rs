//! Scene configuration.
//!
//! A JSON document describing the window, camera, lights and every shader, texture, material
//! and mesh to create. Every field has a default, and the defaults describe the stock demo
//! scene: a textured cube in front of the camera.

use std::path::{Path, PathBuf};

use glam::{Vec3, Vec4};
use serde::{Deserialize, Serialize};

use crate::{
    camera::{DEFAULT_LOOK_SENSITIVITY, DEFAULT_MOVE_SPEED, Projection},
    error::{Error, Result},
};

/// File name looked up in the working directory and then in the user config directory.
pub const CONFIG_FILE: &str = "phong3d.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub window: WindowConfig,
    pub projection: Projection,
    pub clear_colour: Vec4,
    pub camera: CameraConfig,
    pub light_position: Vec3,
    pub controls: Controls,
    pub shaders: Vec<ShaderConfig>,
    pub textures: Vec<TextureConfig>,
    pub materials: Vec<MaterialConfig>,
    pub meshes: Vec<MeshConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub gl_major: u8,
    pub gl_minor: u8,
    pub resizable: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "phong3d".to_string(),
            width: 1280,
            height: 720,
            gl_major: 3,
            gl_minor: 3,
            resizable: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: Vec3,
    pub world_up: Vec3,
    pub move_speed: f32,
    pub look_sensitivity: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 1.0),
            world_up: Vec3::Y,
            move_speed: DEFAULT_MOVE_SPEED,
            look_sensitivity: DEFAULT_LOOK_SENSITIVITY,
        }
    }
}

/// Rates for the mesh keys: Q/E turn the first mesh around Y, Z/X shrink and grow it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Controls {
    /// Degrees per second.
    pub rotate_speed: f32,
    /// Scale units per second.
    pub scale_speed: f32,
    /// Flips vertical mouse look so moving the cursor up raises pitch.
    pub invert_y: bool,
}

impl Default for Controls {
    fn default() -> Self {
        Self {
            rotate_speed: 90.0,
            scale_speed: 0.5,
            invert_y: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShaderConfig {
    pub name: String,
    pub vertex: PathBuf,
    #[serde(default)]
    pub geometry: Option<PathBuf>,
    pub fragment: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextureConfig {
    pub name: String,
    pub path: PathBuf,
    pub unit: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialConfig {
    pub name: String,
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
    pub diffuse_tex: i32,
    pub specular_tex: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshConfig {
    pub name: String,
    /// One of `quad`, `triangle`, `pyramid` or `cube`.
    pub shape: String,
    pub position: Vec3,
    /// Euler angles in degrees.
    pub rotation: Vec3,
    pub scale: Vec3,
    pub material: String,
    pub shader: String,
    pub textures: Vec<String>,
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            shape: "cube".to_string(),
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
            material: String::new(),
            shader: String::new(),
            textures: Vec::new(),
        }
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            projection: Projection::default(),
            clear_colour: Vec4::new(0.0, 0.0, 0.0, 1.0),
            camera: CameraConfig::default(),
            light_position: Vec3::new(0.0, 0.0, 1.0),
            controls: Controls::default(),
            shaders: vec![ShaderConfig {
                name: "core".to_string(),
                vertex: "assets/shaders/vertex_core.glsl".into(),
                geometry: None,
                fragment: "assets/shaders/fragment_core.glsl".into(),
            }],
            textures: vec![
                TextureConfig {
                    name: "box".to_string(),
                    path: "assets/textures/box.png".into(),
                    unit: 0,
                },
                TextureConfig {
                    name: "box_specular".to_string(),
                    path: "assets/textures/box_specular.png".into(),
                    unit: 1,
                },
            ],
            materials: vec![MaterialConfig {
                name: "box".to_string(),
                ambient: Vec3::splat(0.1),
                diffuse: Vec3::ONE,
                specular: Vec3::ONE,
                diffuse_tex: 0,
                specular_tex: 1,
            }],
            meshes: vec![MeshConfig {
                name: "cube".to_string(),
                shape: "cube".to_string(),
                material: "box".to_string(),
                shader: "core".to_string(),
                textures: vec!["box".to_string(), "box_specular".to_string()],
                ..MeshConfig::default()
            }],
        }
    }
}

impl SceneConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| Error::Config(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| Error::ResourceLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        serde_json::from_str(&text).map_err(|e| Error::Config(format!("{}: {e}", path.display())))
    }

    /// Candidate config files, in lookup order.
    pub fn search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(CONFIG_FILE)];
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("phong3d").join(CONFIG_FILE));
        }
        paths
    }

    /// Loads the first config file that exists, or the defaults.
    ///
    /// Also returns the directory relative asset paths resolve against: the config file's
    /// directory, or `fallback_dir` when the defaults are used.
    pub fn load_or_default(fallback_dir: &Path) -> Result<(Self, PathBuf)> {
        Self::load_first(&Self::search_paths(), fallback_dir)
    }

    /// Loads the first of `candidates` that exists, or the defaults with `fallback_dir`.
    pub fn load_first(candidates: &[PathBuf], fallback_dir: &Path) -> Result<(Self, PathBuf)> {
        for path in candidates {
            if path.is_file() {
                log::info!("loading scene config from {}", path.display());
                let config = Self::load(path)?;
                return Ok((config, base_dir_of(path)));
            }
        }
        log::info!("no {CONFIG_FILE} found, using the built-in scene");
        Ok((Self::default(), fallback_dir.to_path_buf()))
    }
}

/// The directory a config file's relative asset paths resolve against.
fn base_dir_of(config_path: &Path) -> PathBuf {
    config_path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
}

/// Resolves `path` against `base` unless it is already absolute.
pub fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::TempDir;

    #[test]
    fn empty_document_gives_stock_scene() {
        let config = SceneConfig::from_json("{}").unwrap();
        assert_eq!(config, SceneConfig::default());
        assert_eq!(config.projection.fov, 90.0);
        assert_eq!(config.meshes[0].textures, vec!["box", "box_specular"]);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = SceneConfig::from_json(
            r#"{
                "window": { "title": "demo", "width": 800 },
                "camera": { "position": [1.0, 2.0, 3.0] },
                "meshes": [
                    { "name": "tri", "shape": "triangle", "material": "box", "shader": "core" }
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(config.window.title, "demo");
        assert_eq!(config.window.width, 800);
        assert_eq!(config.window.height, 720);
        assert_eq!(config.camera.position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(config.camera.move_speed, DEFAULT_MOVE_SPEED);
        assert_eq!(config.meshes.len(), 1);
        assert_eq!(config.meshes[0].scale, Vec3::ONE);
        assert!(config.meshes[0].textures.is_empty());
    }

    #[test]
    fn malformed_document_is_a_config_error() {
        assert!(matches!(
            SceneConfig::from_json(r#"{ "window": 3 }"#),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn json_round_trips() {
        let config = SceneConfig::default();
        let text = config.to_json().unwrap();
        assert_eq!(SceneConfig::from_json(&text).unwrap(), config);
    }

    #[test]
    fn loads_document_from_disk() {
        let dir = TempDir::new("config-load");
        let path = dir.write(
            CONFIG_FILE,
            r#"{ "light_position": [2.0, 3.0, 4.0], "controls": { "invert_y": true } }"#,
        );

        let config = SceneConfig::load(&path).unwrap();
        assert_eq!(config.light_position, Vec3::new(2.0, 3.0, 4.0));
        assert!(config.controls.invert_y);
        assert_eq!(config.controls.rotate_speed, 90.0);
        assert_eq!(config.meshes, SceneConfig::default().meshes);
    }

    #[test]
    fn malformed_file_names_the_path_once() {
        let dir = TempDir::new("config-malformed");
        let path = dir.write(CONFIG_FILE, "{ \"window\": ");

        match SceneConfig::load(&path) {
            Err(Error::Config(message)) => {
                assert!(message.starts_with(&path.display().to_string()));
                assert!(!message.contains("invalid configuration"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn missing_candidates_fall_back_to_defaults() {
        let dir = TempDir::new("config-fallback");
        let candidates = vec![dir.path(CONFIG_FILE), dir.path("nested/phong3d.json")];
        let fallback = Path::new("/srv/phong3d");

        let (config, base) = SceneConfig::load_first(&candidates, fallback).unwrap();
        assert_eq!(config, SceneConfig::default());
        assert_eq!(base, PathBuf::from("/srv/phong3d"));
    }

    #[test]
    fn first_existing_candidate_wins_and_sets_base_dir() {
        let first = TempDir::new("config-first");
        let second = TempDir::new("config-second");
        let found = second.write(CONFIG_FILE, r#"{ "window": { "title": "second" } }"#);
        let candidates = vec![first.path(CONFIG_FILE), found];

        let (config, base) = SceneConfig::load_first(&candidates, Path::new(".")).unwrap();
        assert_eq!(config.window.title, "second");
        assert_eq!(base, second.root());
    }

    #[test]
    fn bare_file_name_resolves_against_working_dir() {
        assert_eq!(base_dir_of(Path::new(CONFIG_FILE)), PathBuf::from("."));
        assert_eq!(
            base_dir_of(Path::new("/etc/phong3d/phong3d.json")),
            PathBuf::from("/etc/phong3d")
        );
    }

    #[test]
    fn relative_paths_resolve_against_base() {
        let base = Path::new("/opt/phong3d");
        assert_eq!(
            resolve(base, Path::new("assets/box.png")),
            PathBuf::from("/opt/phong3d/assets/box.png")
        );
        let absolute = std::env::temp_dir().join("box.png");
        assert_eq!(resolve(base, &absolute), absolute);
    }
}
