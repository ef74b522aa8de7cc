use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{anyhow, Context as _, Result};
use cgmath::{Matrix4, Vector3};
use eframe::glow::{self, HasContext};

use crate::internal::context::SetUniform;

/// Compiled and linked GLSL program with a uniform location cache. Uniforms
/// the program does not declare are a logged no-op, which keeps optional
/// texture slots (e.g. a missing specular map) harmless.
pub struct Shader {
    gl: Arc<glow::Context>,
    program: glow::Program,
    locations: RefCell<HashMap<String, Option<glow::UniformLocation>>>,
}

impl Shader {
    pub fn new(gl: Arc<glow::Context>, vertex_src: &str, fragment_src: &str) -> Result<Self> {
        unsafe {
            let vertex =
                compile(&gl, glow::VERTEX_SHADER, vertex_src).context("compiling vertex shader")?;
            let fragment = compile(&gl, glow::FRAGMENT_SHADER, fragment_src)
                .context("compiling fragment shader")?;

            let program = gl.create_program().map_err(|e| anyhow!(e))?;
            gl.attach_shader(program, vertex);
            gl.attach_shader(program, fragment);
            gl.link_program(program);

            let linked = gl.get_program_link_status(program);
            gl.detach_shader(program, vertex);
            gl.detach_shader(program, fragment);
            gl.delete_shader(vertex);
            gl.delete_shader(fragment);

            if !linked {
                let info = gl.get_program_info_log(program);
                gl.delete_program(program);
                return Err(anyhow!("program link failed: {info}"));
            }

            Ok(Self {
                gl,
                program,
                locations: RefCell::new(HashMap::new()),
            })
        }
    }

    pub fn bind(&self) {
        unsafe { self.gl.use_program(Some(self.program)) }
    }

    fn location(&self, name: &str) -> Option<glow::UniformLocation> {
        self.locations
            .borrow_mut()
            .entry(name.to_owned())
            .or_insert_with(|| {
                let location = unsafe { self.gl.get_uniform_location(self.program, name) };
                if location.is_none() {
                    log::debug!("uniform {name} not present in program, ignoring");
                }
                location
            })
            .clone()
    }

    pub fn set_float(&self, name: &str, value: f32) {
        if let Some(location) = self.location(name) {
            unsafe { self.gl.uniform_1_f32(Some(&location), value) }
        }
    }

    pub fn set_vec3(&self, name: &str, value: Vector3<f32>) {
        if let Some(location) = self.location(name) {
            unsafe {
                self.gl
                    .uniform_3_f32(Some(&location), value.x, value.y, value.z)
            }
        }
    }

    pub fn set_mat4(&self, name: &str, value: &Matrix4<f32>) {
        if let Some(location) = self.location(name) {
            let columns: &[f32; 16] = value.as_ref();
            unsafe {
                self.gl
                    .uniform_matrix_4_f32_slice(Some(&location), false, columns)
            }
        }
    }

    pub fn destroy(&self) {
        unsafe { self.gl.delete_program(self.program) }
    }
}

impl SetUniform for Shader {
    fn set_int(&self, name: &str, value: i32) {
        if let Some(location) = self.location(name) {
            unsafe { self.gl.uniform_1_i32(Some(&location), value) }
        }
    }
}

unsafe fn compile(gl: &glow::Context, stage: u32, source: &str) -> Result<glow::Shader> {
    let shader = gl.create_shader(stage).map_err(|e| anyhow!(e))?;
    gl.shader_source(shader, source);
    gl.compile_shader(shader);

    if !gl.get_shader_compile_status(shader) {
        let info = gl.get_shader_info_log(shader);
        gl.delete_shader(shader);
        return Err(anyhow!("shader compile failed: {info}"));
    }
    Ok(shader)
}
