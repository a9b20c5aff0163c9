use std::{path::Path, sync::Arc};

use super::{Scene, SceneObject};
use crate::{
    abs::{Material, Mesh, ShaderFiles, ShaderProgram, Texture},
    camera::Camera,
    config::{SceneConfig, resolve},
    error::Result,
    geometry::Shape,
    gpu::Gpu,
    transform::Transform,
};

impl<G: Gpu> Scene<G> {
    /// Builds every resource `config` describes and starts the scene.
    ///
    /// Relative paths resolve against `base_dir`. Shader and mesh errors abort the build;
    /// unreadable images are replaced by the placeholder texture. Anything created before an
    /// error is released again.
    pub fn from_config(gl: &Arc<G>, config: &SceneConfig, base_dir: &Path) -> Result<Self> {
        let camera = Camera::new(config.camera.position, config.camera.world_up)
            .with_speeds(config.camera.move_speed, config.camera.look_sensitivity);
        let mut scene = Scene::new(gl, camera, config.projection, config.light_position)
            .with_clear_colour(config.clear_colour)
            .with_controls(config.controls);

        for shader in &config.shaders {
            let mut files = ShaderFiles::new(
                resolve(base_dir, &shader.vertex),
                resolve(base_dir, &shader.fragment),
            );
            if let Some(geometry) = &shader.geometry {
                files = files.with_geometry(resolve(base_dir, geometry));
            }
            let program = ShaderProgram::from_files(gl, &files)?;
            scene.add_shader(&shader.name, program)?;
        }

        for texture in &config.textures {
            let path = resolve(base_dir, &texture.path);
            let loaded = Texture::load_or_placeholder(gl, &path, texture.unit)?;
            scene.add_texture(&texture.name, loaded)?;
        }

        for material in &config.materials {
            scene.add_material(
                &material.name,
                Material::new(
                    material.ambient,
                    material.diffuse,
                    material.specular,
                    material.diffuse_tex,
                    material.specular_tex,
                ),
            )?;
        }

        for mesh in &config.meshes {
            let shape: Shape = mesh.shape.parse()?;
            let transform = Transform::new(mesh.position, mesh.rotation, mesh.scale);
            log::debug!("creating {shape} mesh '{}'", mesh.name);
            let object = SceneObject::new(Mesh::new(gl, transform, shape)?, &mesh.material, &mesh.shader)
                .with_textures(&mesh.textures);
            scene.add_object(&mesh.name, object)?;
        }

        scene.start()?;
        Ok(scene)
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::{
        config::{MeshConfig, ShaderConfig},
        error::Error,
        gpu::{
            DrawCall, ShaderStage,
            recording::{Call, RecordingGpu},
        },
        scene::ScenePhase,
        testutil::TempDir,
    };

    const VERTEX: &str = "#version 330 core\nvoid main() {}\n";
    const FRAGMENT: &str = "#version 330 core\nvoid main() {}\n";

    /// The stock config with its shaders written to `dir` and its images left missing.
    fn stock_assets(dir: &TempDir) -> SceneConfig {
        std::fs::create_dir_all(dir.path("assets/shaders")).unwrap();
        dir.write("assets/shaders/vertex_core.glsl", VERTEX);
        dir.write("assets/shaders/fragment_core.glsl", FRAGMENT);
        SceneConfig::default()
    }

    #[test]
    fn stock_config_builds_a_running_scene() {
        let dir = TempDir::new("loader-stock");
        let config = stock_assets(&dir);
        let gl = Arc::new(RecordingGpu::default());

        let scene = Scene::from_config(&gl, &config, dir.root()).unwrap();

        assert_eq!(scene.phase(), ScenePhase::Running);
        assert!(gl.calls().contains(&Call::ConfigurePipeline));
        assert!(scene.texture("box").unwrap().is_placeholder());
        assert_eq!(scene.texture("box_specular").unwrap().unit(), 1);
        assert_eq!(scene.material("box").unwrap().ambient(), Vec3::splat(0.1));
        assert_eq!(scene.camera().position(), Vec3::new(0.0, 0.0, 1.0));

        gl.clear_calls();
        scene.render((1280, 720)).unwrap();
        assert_eq!(gl.draws(), vec![DrawCall::Elements { count: 24 }]);
    }

    #[test]
    fn missing_shader_file_never_starts() {
        let dir = TempDir::new("loader-missing");
        let gl = Arc::new(RecordingGpu::default());

        let err = Scene::from_config(&gl, &SceneConfig::default(), dir.root()).err().unwrap();

        match err {
            Error::ResourceLoad { path, .. } => assert!(path.ends_with("vertex_core.glsl")),
            other => panic!("unexpected {other:?}"),
        }
        assert!(gl.draws().is_empty());
        assert!(!gl.calls().contains(&Call::ConfigurePipeline));
    }

    #[test]
    fn compile_failure_is_fatal_and_releases_stages() {
        let dir = TempDir::new("loader-compile");
        let config = stock_assets(&dir);
        let gl = Arc::new(RecordingGpu::default());
        gl.fail_compile.set(Some(ShaderStage::Fragment));

        let err = Scene::from_config(&gl, &config, dir.root()).err().unwrap();

        assert!(matches!(err, Error::Compile { stage: ShaderStage::Fragment, .. }));
        assert_eq!(
            gl.calls(),
            vec![
                Call::CompileStage(ShaderStage::Vertex, 1),
                Call::ReleaseStage(1),
            ]
        );
    }

    #[test]
    fn geometry_stage_is_resolved_and_linked() {
        let dir = TempDir::new("loader-geometry");
        let mut config = stock_assets(&dir);
        dir.write("assets/shaders/normals.glsl", "#version 330 core\n");
        config.shaders[0] = ShaderConfig {
            geometry: Some("assets/shaders/normals.glsl".into()),
            ..config.shaders[0].clone()
        };
        let gl = Arc::new(RecordingGpu::default());

        let _scene = Scene::from_config(&gl, &config, dir.root()).unwrap();
        assert!(gl.calls().contains(&Call::LinkStages(vec![1, 2, 3], 4)));
    }

    #[test]
    fn unknown_shape_is_fatal_and_cleans_up() {
        let dir = TempDir::new("loader-shape");
        let mut config = stock_assets(&dir);
        config.meshes.push(MeshConfig {
            name: "ball".to_string(),
            shape: "sphere".to_string(),
            material: "box".to_string(),
            shader: "core".to_string(),
            ..MeshConfig::default()
        });
        let gl = Arc::new(RecordingGpu::default());

        let err = Scene::from_config(&gl, &config, dir.root()).err().unwrap();

        assert!(matches!(err, Error::UnsupportedShape(ref name) if name == "sphere"));
        let calls = gl.calls();
        let released = |call: &Call| calls.iter().filter(|c| *c == call).count();
        // Program 3, textures 4 and 5, and the cube's vertex array 6 were all released.
        assert_eq!(released(&Call::ReleaseProgram(3)), 1);
        assert_eq!(released(&Call::ReleaseTexture(4)), 1);
        assert_eq!(released(&Call::ReleaseTexture(5)), 1);
        assert_eq!(released(&Call::ReleaseVertexArray(6)), 1);
    }

    #[test]
    fn dangling_texture_name_is_reported() {
        let dir = TempDir::new("loader-dangling");
        let mut config = stock_assets(&dir);
        config.meshes[0].textures.push("alien".to_string());
        let gl = Arc::new(RecordingGpu::default());

        let err = Scene::from_config(&gl, &config, dir.root()).err().unwrap();
        assert!(matches!(err, Error::NotFound { kind: "texture", ref name } if name == "alien"));
    }

    #[test]
    fn meshes_take_their_configured_transform() {
        let dir = TempDir::new("loader-transform");
        let mut config = stock_assets(&dir);
        config.meshes[0].shape = "Pyramid".to_string();
        config.meshes[0].position = Vec3::new(0.0, 0.0, -3.0);
        config.meshes[0].scale = Vec3::splat(2.0);
        let gl = Arc::new(RecordingGpu::default());

        let scene = Scene::from_config(&gl, &config, dir.root()).unwrap();
        let mesh = &scene.object("cube").unwrap().mesh;
        assert_eq!(mesh.position(), Vec3::new(0.0, 0.0, -3.0));
        assert_eq!(mesh.scale(), Vec3::splat(2.0));
        assert_eq!(mesh.index_count(), 0);
    }
}
