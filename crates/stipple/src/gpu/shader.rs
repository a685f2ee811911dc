use crate::error::{DrawError, Result};

/// Vertex input declared by a built-in shader.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ShaderInput {
    pub id: &'static str,
    pub len: usize,
}

/// Shaders every host must provide.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BuiltinShader {
    /// Flat fill with a `color` vec4 uniform. Inputs: `pos`.
    UniformColor,
    /// Samples the `image` texture. Inputs: `pos`, `texCoord`.
    Image,
}

const UNIFORM_COLOR_INPUTS: &[ShaderInput] = &[ShaderInput { id: "pos", len: 2 }];

const IMAGE_INPUTS: &[ShaderInput] = &[
    ShaderInput { id: "pos", len: 2 },
    ShaderInput { id: "texCoord", len: 2 },
];

impl BuiltinShader {
    #[inline]
    pub fn name(self) -> &'static str {
        match self {
            BuiltinShader::UniformColor => "UNIFORM_COLOR",
            BuiltinShader::Image => "IMAGE",
        }
    }

    /// Vertex inputs in shader location order.
    #[inline]
    pub fn vertex_inputs(self) -> &'static [ShaderInput] {
        match self {
            BuiltinShader::UniformColor => UNIFORM_COLOR_INPUTS,
            BuiltinShader::Image => IMAGE_INPUTS,
        }
    }

    fn float_uniform(self) -> Option<&'static str> {
        match self {
            BuiltinShader::UniformColor => Some("color"),
            BuiltinShader::Image => None,
        }
    }

    fn sampler_uniform(self) -> Option<&'static str> {
        match self {
            BuiltinShader::UniformColor => None,
            BuiltinShader::Image => Some("image"),
        }
    }
}

/// A built-in shader together with the uniform values bound for one draw.
///
/// `T` is the host's texture type; samplers are borrowed for the lifetime of
/// the binding.
#[derive(Debug)]
pub struct Shader<'t, T> {
    builtin: BuiltinShader,
    color: Option<[f32; 4]>,
    image: Option<&'t T>,
}

impl<'t, T> Shader<'t, T> {
    #[inline]
    pub fn from_builtin(builtin: BuiltinShader) -> Self {
        Self { builtin, color: None, image: None }
    }

    #[inline]
    pub fn builtin(&self) -> BuiltinShader {
        self.builtin
    }

    /// Sets a vec4 float uniform.
    pub fn uniform_float(&mut self, name: &str, value: [f32; 4]) -> Result<()> {
        if self.builtin.float_uniform() != Some(name) {
            return Err(self.unknown_uniform("float", name));
        }
        self.color = Some(value);
        Ok(())
    }

    /// Binds a texture to a sampler uniform.
    pub fn uniform_sampler(&mut self, name: &str, texture: &'t T) -> Result<()> {
        if self.builtin.sampler_uniform() != Some(name) {
            return Err(self.unknown_uniform("sampler", name));
        }
        self.image = Some(texture);
        Ok(())
    }

    #[inline]
    pub fn color(&self) -> Option<[f32; 4]> {
        self.color
    }

    #[inline]
    pub fn image(&self) -> Option<&'t T> {
        self.image
    }

    fn unknown_uniform(&self, kind: &'static str, name: &str) -> DrawError {
        DrawError::UnknownUniform { shader: self.builtin.name(), kind, name: name.to_owned() }
    }
}
