/// Mock backends for unit tests (no GPU required)
///
/// These mocks record every upload, bind and uniform set so tests can
/// assert on the exact backend traffic a constant buffer produces.

use std::sync::{Arc, Mutex};

use rustc_hash::FxHashMap;

use crate::backend::{
    NativeConstantBuffer, NativeConstantBufferBackend, UniformLocationBackend,
    ProgramHandle, ShaderStage, UniformLocation,
};
use crate::error::Result;

// ============================================================================
// Mock native constant buffer
// ============================================================================

#[derive(Debug)]
pub struct MockNativeBuffer {
    pub size: usize,
    pub uploads: Mutex<Vec<Vec<u8>>>,
    pub binds: Mutex<Vec<(ShaderStage, u32)>>,
}

impl MockNativeBuffer {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            uploads: Mutex::new(Vec::new()),
            binds: Mutex::new(Vec::new()),
        }
    }

    /// Number of full-buffer uploads recorded so far
    pub fn upload_count(&self) -> usize {
        self.uploads.lock().unwrap().len()
    }

    /// Bytes of the most recent upload, if any
    pub fn last_upload(&self) -> Option<Vec<u8>> {
        self.uploads.lock().unwrap().last().cloned()
    }
}

impl NativeConstantBuffer for MockNativeBuffer {
    fn upload(&self, data: &[u8]) -> Result<()> {
        self.uploads.lock().unwrap().push(data.to_vec());
        Ok(())
    }

    fn bind(&self, stage: ShaderStage, slot: u32) -> Result<()> {
        self.binds.lock().unwrap().push((stage, slot));
        Ok(())
    }
}

// ============================================================================
// Mock native backend
// ============================================================================

#[derive(Default)]
pub struct MockNativeBackend {
    pub created: Vec<Arc<MockNativeBuffer>>,
}

impl MockNativeBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl NativeConstantBufferBackend for MockNativeBackend {
    fn create_constant_buffer(&mut self, size_in_bytes: usize)
        -> Result<Arc<dyn NativeConstantBuffer>>
    {
        let buffer = Arc::new(MockNativeBuffer::new(size_in_bytes));
        self.created.push(buffer.clone());
        Ok(buffer)
    }
}

// ============================================================================
// Mock uniform backend
// ============================================================================

#[derive(Default)]
pub struct MockUniformBackend {
    /// Uniform name -> location, per program
    pub locations: FxHashMap<(ProgramHandle, String), UniformLocation>,
    /// Recorded lookups (program, name)
    pub lookups: Vec<(ProgramHandle, String)>,
    /// Recorded uploads (location, values)
    pub sets: Vec<(UniformLocation, Vec<f32>)>,
}

impl MockUniformBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a uniform location for `name` inside `program`
    pub fn register_uniform(&mut self, program: ProgramHandle, name: &str, location: i32) {
        self.locations
            .insert((program, name.to_string()), UniformLocation(location));
    }
}

impl UniformLocationBackend for MockUniformBackend {
    fn uniform_location(&mut self, program: ProgramHandle, name: &str)
        -> Option<UniformLocation>
    {
        self.lookups.push((program, name.to_string()));
        self.locations.get(&(program, name.to_string())).copied()
    }

    fn set_vec4_array(&mut self, location: UniformLocation, values: &[f32]) -> Result<()> {
        self.sets.push((location, values.to_vec()));
        Ok(())
    }
}
