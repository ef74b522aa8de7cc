use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use cgmath::{EuclideanSpace, Matrix4, Point3, Rad};
use eframe::glow::{self, HasContext};

use crate::engine::model::Model;
use crate::engine::model_loader;
use crate::engine::shader::Shader;
use crate::engine::texture_loader::TextureLoader;

use super::camera::Camera;
use super::context::SetUniform;

const MODEL_VERT: &str = include_str!("../../shaders/model.vert");
const MODEL_FRAG: &str = include_str!("../../shaders/model.frag");

pub struct PointLight {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

/// Everything the frame loop needs to render one frame: the shader, the
/// loaded model, the camera, the lights and a spin angle for the turntable.
pub struct Scene {
    gl: Arc<glow::Context>,
    shader: Shader,
    model: Model<glow::Context>,
    textures: TextureLoader,
    pub camera: Camera,
    pub lights: Vec<PointLight>,
    pub spin_angle: f32,
    pub auto_spin: bool,
}

impl Scene {
    pub fn new(gl: Arc<glow::Context>, model_path: &Path) -> Result<Self> {
        let mut textures = TextureLoader::new(gl.clone());
        let model = model_loader::load_model(gl.clone(), model_path, &mut textures)?;
        let shader = Shader::new(gl.clone(), MODEL_VERT, MODEL_FRAG)?;

        Ok(Self {
            gl,
            shader,
            model,
            textures,
            camera: Camera::new(Point3::new(0.0, 0.5, 0.0), 4.0),
            lights: vec![
                PointLight {
                    position: [-3.0, 1.0, 0.0],
                    color: [1.0, 1.0, 1.0],
                },
                PointLight {
                    position: [3.0, 1.0, 0.0],
                    color: [1.0, 1.0, 1.0],
                },
            ],
            spin_angle: 0.0,
            auto_spin: true,
        })
    }

    pub fn mesh_count(&self) -> usize {
        self.model.meshes.len()
    }

    pub fn vertex_count(&self) -> usize {
        self.model
            .meshes
            .iter()
            .map(|mesh| mesh.vertices().len())
            .sum()
    }

    pub fn triangle_count(&self) -> usize {
        self.model
            .meshes
            .iter()
            .map(|mesh| mesh.indices().len() / 3)
            .sum()
    }

    pub fn draw(&self, aspect_ratio: f32) {
        unsafe {
            self.gl.enable(glow::DEPTH_TEST);
            self.gl.clear(glow::DEPTH_BUFFER_BIT);
        }

        self.shader.bind();
        self.shader.set_mat4("view", &self.camera.view_matrix());
        self.shader
            .set_mat4("projection", &self.camera.projection_matrix(aspect_ratio));
        self.shader
            .set_mat4("model", &Matrix4::from_angle_y(Rad(self.spin_angle)));
        self.shader
            .set_vec3("viewPos", self.camera.position().to_vec());

        for (i, light) in self.lights.iter().enumerate() {
            self.shader
                .set_vec3(&format!("pointLights[{i}].position"), light.position.into());
            self.shader
                .set_vec3(&format!("pointLights[{i}].color"), light.color.into());
        }
        self.shader
            .set_int("pointLightCount", self.lights.len() as i32);

        self.model.draw(&self.shader);

        unsafe { self.gl.disable(glow::DEPTH_TEST) }
    }

    /// Releases the shader and all loaded textures; mesh buffers go with the
    /// meshes when the scene is dropped.
    pub fn destroy(&mut self) {
        self.shader.destroy();
        self.textures.destroy();
    }
}
