/// Backend capability traits for constant-buffer upload
///
/// Constant buffers never depend on a concrete graphics API. A backend
/// exposes one of two capabilities:
///
/// - `NativeConstantBufferBackend`: the API has a native constant-buffer
///   object that is allocated once and overwritten whole (Direct3D-style).
/// - `UniformLocationBackend`: the API resolves a named uniform inside a
///   compiled program and sets it as a float vector array (GL-style).

use std::sync::Arc;

use crate::error::Result;

// ============================================================================
// Handle types
// ============================================================================

/// Shader pipeline stage a constant buffer is bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    /// Vertex shader stage
    Vertex,
    /// Fragment (pixel) shader stage
    Fragment,
}

/// Opaque handle identifying a linked shader program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProgramHandle(pub u64);

/// Resolved location of a named uniform within a program
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UniformLocation(pub i32);

/// Opaque handle identifying a texture object owned by a backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u64);

// ============================================================================
// Native constant-buffer capability (Direct3D-style)
// ============================================================================

/// Opaque native constant-buffer object
///
/// Created once with a fixed byte size and overwritten as one unit.
/// The object is destroyed when dropped.
pub trait NativeConstantBuffer: Send + Sync {
    /// Overwrite the whole buffer with new contents
    ///
    /// # Arguments
    ///
    /// * `data` - Staging bytes, exactly the buffer's allocated size
    fn upload(&self, data: &[u8]) -> Result<()>;

    /// Bind the buffer to a shader stage at the given slot
    ///
    /// # Arguments
    ///
    /// * `stage` - Vertex or Fragment stage
    /// * `slot` - Constant-buffer register slot
    fn bind(&self, stage: ShaderStage, slot: u32) -> Result<()>;
}

/// Backend capability: allocate native constant-buffer objects
pub trait NativeConstantBufferBackend {
    /// Allocate a native constant buffer of fixed size
    ///
    /// # Arguments
    ///
    /// * `size_in_bytes` - Buffer size, fixed for the object's lifetime
    fn create_constant_buffer(&mut self, size_in_bytes: usize)
        -> Result<Arc<dyn NativeConstantBuffer>>;
}

// ============================================================================
// Uniform-location capability (GL-style)
// ============================================================================

/// Backend capability: named uniform lookup and float-array upload
pub trait UniformLocationBackend {
    /// Resolve a uniform location by name within a compiled program
    ///
    /// Returns `None` when the program does not reference the uniform.
    /// The caller treats that as "unused", not as an error.
    fn uniform_location(&mut self, program: ProgramHandle, name: &str)
        -> Option<UniformLocation>;

    /// Set a float vec4 array at the given location
    ///
    /// # Arguments
    ///
    /// * `location` - Resolved uniform location
    /// * `values` - Flat float data, 4 components per register
    fn set_vec4_array(&mut self, location: UniformLocation, values: &[f32]) -> Result<()>;
}
