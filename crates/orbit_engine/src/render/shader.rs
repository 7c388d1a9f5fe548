//! Shader program
//!
//! One program serves every quad: transform by `uMVPMatrix`, sample
//! `sTexture` at the interpolated texture coordinate.

use crate::backend::{GpuContext, ProgramHandle, ShaderHandle, ShaderStage, UniformLocation};
use crate::render::vertex::Vertex;
use crate::render::{RenderError, RenderResult};

/// Vertex stage source
pub const VERTEX_SHADER: &str = "\
uniform mat4 uMVPMatrix;
attribute vec4 aPosition;
attribute vec2 aTexCoord;
varying vec2 vTexCoord;
void main() {
    gl_Position = uMVPMatrix * aPosition;
    vTexCoord = aTexCoord;
}
";

/// Fragment stage source
pub const FRAGMENT_SHADER: &str = "\
precision mediump float;
varying vec2 vTexCoord;
uniform sampler2D sTexture;
void main() {
    gl_FragColor = texture2D(sTexture, vTexCoord);
}
";

/// Linked program and its uniform locations
#[derive(Debug, PartialEq, Eq)]
pub struct ShaderProgram {
    handle: ProgramHandle,
    mvp_location: Option<UniformLocation>,
    sampler_location: Option<UniformLocation>,
}

impl ShaderProgram {
    /// Compile and link the textured-quad program
    pub fn build(gpu: &mut dyn GpuContext) -> RenderResult<Self> {
        Self::from_sources(gpu, VERTEX_SHADER, FRAGMENT_SHADER)
    }

    /// Compile and link a program from the given sources
    ///
    /// Attribute locations are bound from [`Vertex::ATTRIBUTES`] before
    /// linking. No object created along the way outlives a failure.
    pub fn from_sources(gpu: &mut dyn GpuContext, vertex_src: &str, fragment_src: &str) -> RenderResult<Self> {
        let vertex = compile(gpu, ShaderStage::Vertex, vertex_src)?;
        let fragment = match compile(gpu, ShaderStage::Fragment, fragment_src) {
            Ok(shader) => shader,
            Err(e) => {
                gpu.delete_shader(vertex);
                return Err(e);
            }
        };

        let handle = match gpu.create_program() {
            Ok(handle) => handle,
            Err(e) => {
                gpu.delete_shader(vertex);
                gpu.delete_shader(fragment);
                return Err(e);
            }
        };

        gpu.attach_shader(handle, vertex);
        gpu.attach_shader(handle, fragment);
        for attribute in Vertex::ATTRIBUTES {
            gpu.bind_attrib_location(handle, attribute.location, attribute.name);
        }
        gpu.link_program(handle);

        let linked = gpu.program_link_status(handle);
        let link_log = if linked { String::new() } else { gpu.program_info_log(handle) };

        gpu.detach_shader(handle, vertex);
        gpu.detach_shader(handle, fragment);
        gpu.delete_shader(vertex);
        gpu.delete_shader(fragment);

        if !linked {
            gpu.delete_program(handle);
            return Err(RenderError::ShaderLink(link_log));
        }

        let mvp_location = gpu.uniform_location(handle, "uMVPMatrix");
        let sampler_location = gpu.uniform_location(handle, "sTexture");
        if mvp_location.is_none() || sampler_location.is_none() {
            log::warn!("Shader program {:?} is missing a uniform; draws may be blank", handle);
        }

        log::debug!("Linked shader program {:?}", handle);
        Ok(Self {
            handle,
            mvp_location,
            sampler_location,
        })
    }

    /// Program handle
    pub const fn handle(&self) -> ProgramHandle {
        self.handle
    }

    /// Location of `uMVPMatrix`
    pub const fn mvp_location(&self) -> Option<UniformLocation> {
        self.mvp_location
    }

    /// Location of `sTexture`
    pub const fn sampler_location(&self) -> Option<UniformLocation> {
        self.sampler_location
    }

    /// Delete the program
    pub fn release(self, gpu: &mut dyn GpuContext) {
        gpu.delete_program(self.handle);
    }
}

fn compile(gpu: &mut dyn GpuContext, stage: ShaderStage, source: &str) -> RenderResult<ShaderHandle> {
    let shader = gpu.create_shader(stage)?;
    gpu.compile_shader(shader, source);
    if gpu.shader_compile_status(shader) {
        return Ok(shader);
    }

    let log = gpu.shader_info_log(shader);
    gpu.delete_shader(shader);
    Err(RenderError::ShaderCompile { stage, log })
}
