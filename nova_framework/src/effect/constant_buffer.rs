/// Constant buffer - staged uniform storage with dirty tracking
///
/// A ConstantBuffer aggregates the values of several effect parameters
/// into one contiguous byte region matching a GPU constant-buffer layout.
/// `update` copies changed parameter values into the staging bytes (state
/// keys detect staleness), `apply_native`/`apply_uniform` push the staged
/// bytes to a backend only while dirty.
///
/// The staging region's length is fixed at construction and never
/// reallocated. All copies are bounds-checked against it.

use std::sync::Arc;

use crate::backend::{
    NativeConstantBuffer, NativeConstantBufferBackend, ProgramHandle, ShaderStage,
    UniformLocation, UniformLocationBackend,
};
use crate::effect::parameter::{self, EffectParameter, EffectParameterType, ELEMENT_SIZE};
use crate::effect::parameter_collection::EffectParameterCollection;
use crate::error::{Error, Result};
use crate::{nova_bail, nova_error, nova_trace};

const SOURCE: &str = "nova::ConstantBuffer";

/// Bytes per GPU constant register: 4 components of 4 bytes each.
/// The rectangular copy path assumes exactly this element width.
const REGISTER_SIZE: usize = ELEMENT_SIZE * 4;

// ===== LAYOUT =====

/// One tracked parameter inside a constant buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutEntry {
    /// Index into the effect's parameter collection
    pub parameter: usize,
    /// Byte offset of the parameter's value inside the buffer
    pub offset: usize,
}

/// Immutable layout of a constant buffer
///
/// Built once from shader reflection and shared between clones.
#[derive(Debug)]
pub struct ConstantBufferLayout {
    name: String,
    size_in_bytes: usize,
    entries: Vec<LayoutEntry>,
}

impl ConstantBufferLayout {
    /// Build a layout, validating that no entry offset exceeds the size
    pub fn new(name: &str, size_in_bytes: usize, entries: Vec<LayoutEntry>) -> Result<Self> {
        if size_in_bytes == 0 {
            nova_bail!(SOURCE, "Constant buffer '{}' must have a non-zero size", name);
        }
        for entry in &entries {
            if entry.offset >= size_in_bytes {
                nova_bail!(SOURCE,
                    "Constant buffer '{}': offset {} of parameter {} exceeds size {}",
                    name, entry.offset, entry.parameter, size_in_bytes);
            }
        }
        Ok(Self {
            name: name.to_string(),
            size_in_bytes,
            entries,
        })
    }

    /// Display name, used to resolve the backend uniform location
    pub fn name(&self) -> &str { &self.name }

    /// Buffer size in bytes
    pub fn size_in_bytes(&self) -> usize { self.size_in_bytes }

    /// Tracked (parameter, offset) pairs
    pub fn entries(&self) -> &[LayoutEntry] { &self.entries }
}

// ===== BACKEND BINDING STATE =====

/// Backend-binding sub-state: Unbound until the first apply resolves a
/// native buffer object or a program uniform location.
enum BackendBinding {
    Unbound,
    Native(Arc<dyn NativeConstantBuffer>),
    Uniform {
        program: ProgramHandle,
        location: UniformLocation,
    },
}

// ===== CONSTANT BUFFER =====

/// Staged constant-buffer contents plus backend binding state
pub struct ConstantBuffer {
    layout: Arc<ConstantBufferLayout>,
    buffer: Vec<u8>,
    state_key: u64,
    dirty: bool,
    binding: BackendBinding,
}

impl ConstantBuffer {
    /// Create a clean, unbound buffer with zeroed staging storage
    pub fn new(layout: Arc<ConstantBufferLayout>) -> Self {
        let buffer = vec![0u8; layout.size_in_bytes()];
        Self {
            layout,
            buffer,
            state_key: 0,
            dirty: false,
            binding: BackendBinding::Unbound,
        }
    }

    // ===== ACCESSORS =====

    /// Display name (from the layout)
    pub fn name(&self) -> &str { self.layout.name() }

    /// Buffer size in bytes (fixed at construction)
    pub fn size_in_bytes(&self) -> usize { self.buffer.len() }

    /// Shared immutable layout
    pub fn layout(&self) -> &Arc<ConstantBufferLayout> { &self.layout }

    /// True when staged bytes differ from the last backend upload
    pub fn is_dirty(&self) -> bool { self.dirty }

    /// Staged bytes
    pub fn contents(&self) -> &[u8] { &self.buffer }

    /// Invalidate the backend binding
    ///
    /// Forces the next apply to re-allocate the native buffer or re-resolve
    /// the uniform location (e.g. after a context loss).
    pub fn clear_binding(&mut self) {
        self.binding = BackendBinding::Unbound;
    }

    // ===== UPDATE =====

    /// Copy changed parameter values into the staging buffer
    ///
    /// For each tracked (parameter, offset) pair, parameters whose state
    /// key is older than the buffer's cached key are skipped. Idempotent:
    /// a second call with no intervening parameter writes copies nothing.
    ///
    /// # Errors
    ///
    /// `UnsupportedParameterType` when a tracked parameter is not
    /// float-typed - the buffer only supports float layouts.
    pub fn update(&mut self, parameters: &EffectParameterCollection) -> Result<()> {
        // If the cached key ran ahead of the global counter the keys have
        // rolled over; reset so nothing is skipped forever.
        let next = parameter::next_state_key();
        if self.state_key > next {
            self.state_key = 0;
        }

        let layout = self.layout.clone();
        for entry in layout.entries() {
            let Some(param) = parameters.get(entry.parameter) else {
                nova_bail!(SOURCE,
                    "Constant buffer '{}' tracks parameter index {} outside the collection (len {})",
                    layout.name(), entry.parameter, parameters.len());
            };

            if param.state_key() < self.state_key {
                continue;
            }

            self.dirty = true;
            self.set_parameter(entry.offset, param)?;
        }

        self.state_key = next;
        Ok(())
    }

    /// Copy one parameter's value into the buffer at `offset`
    fn set_parameter(&mut self, offset: usize, param: &EffectParameter) -> Result<()> {
        if param.parameter_type() != EffectParameterType::Single {
            nova_error!(SOURCE,
                "Parameter '{}' is not float-typed; constant buffer '{}' only supports float layouts",
                param.name(), self.layout.name());
            return Err(Error::UnsupportedParameterType);
        }

        // Struct and object parameters carry no flat data.
        if param.data().is_empty() {
            return Ok(());
        }

        if param.element_count() > 0 {
            // Array elements report zero registers; treat the whole array
            // as one tall value and let the source length clamp the rows.
            let rows = param.row_count() * param.element_count();
            self.set_data(offset, rows, param.column_count(), 0, param.data())
        } else {
            self.set_data(
                offset,
                param.row_count(),
                param.column_count(),
                param.register_count(),
                param.data(),
            )
        }
    }

    /// Shape-dispatched copy into the staging buffer
    fn set_data(
        &mut self,
        offset: usize,
        rows: u32,
        columns: u32,
        registers: u32,
        data: &[u8],
    ) -> Result<()> {
        let mut rows = rows as usize;
        let columns = columns as usize;

        // The compiler crops unused trailing rows; clamp to the register
        // count when reflection reported one.
        if registers > 0 {
            rows = rows.min(registers as usize);
        }

        if rows == 1 && columns == 1 {
            // Single scalar.
            self.copy_into(offset, &data[..data.len().min(ELEMENT_SIZE)])
        } else if rows == 1 || columns == 4 {
            // Row vectors and full-width matrices are contiguous in both
            // source and destination: one bulk copy.
            let actual_rows = data.len() / (columns * ELEMENT_SIZE);
            let len = rows.min(actual_rows) * columns * ELEMENT_SIZE;
            self.copy_into(offset, &data[..len])
        } else {
            // General rectangular value: the destination advances one full
            // register per row regardless of the source row width.
            let source_stride = columns * ELEMENT_SIZE;
            let actual_rows = data.len() / source_stride;
            let rows = rows.min(actual_rows);

            for y in 0..rows {
                let source = &data[y * source_stride..(y + 1) * source_stride];
                self.copy_into(offset + REGISTER_SIZE * y, source)?;
            }
            Ok(())
        }
    }

    /// Bounds-checked copy into the staging bytes
    fn copy_into(&mut self, offset: usize, data: &[u8]) -> Result<()> {
        let end = offset + data.len();
        if end > self.buffer.len() {
            nova_bail!(SOURCE,
                "Copy of {} bytes at offset {} exceeds constant buffer '{}' ({} bytes)",
                data.len(), offset, self.layout.name(), self.buffer.len());
        }
        self.buffer[offset..end].copy_from_slice(data);
        Ok(())
    }

    // ===== APPLY =====

    /// Upload to a backend with native constant-buffer objects
    ///
    /// Allocates the native object lazily, uploads the full staging buffer
    /// when dirty, and binds the object to (stage, slot) on every call.
    ///
    /// The caller must hold exclusive access to the graphics context.
    pub fn apply_native(
        &mut self,
        backend: &mut dyn NativeConstantBufferBackend,
        stage: ShaderStage,
        slot: u32,
    ) -> Result<()> {
        let native = match &self.binding {
            BackendBinding::Native(native) => native.clone(),
            _ => {
                nova_trace!(SOURCE,
                    "Allocating native buffer for '{}' ({} bytes)",
                    self.layout.name(), self.buffer.len());
                let native = backend.create_constant_buffer(self.buffer.len())?;
                self.binding = BackendBinding::Native(native.clone());
                // A fresh native object holds no data yet.
                self.dirty = true;
                native
            }
        };

        if self.dirty {
            native.upload(&self.buffer)?;
            self.dirty = false;
        }

        native.bind(stage, slot)
    }

    /// Upload to a backend addressing uniforms by program location
    ///
    /// When `program` differs from the last bound program the uniform
    /// location is re-resolved by the layout name; a program that does not
    /// reference this buffer is skipped silently (unused uniform). When
    /// bound and clean, the call is a no-op.
    ///
    /// The caller must hold exclusive access to the graphics context and
    /// must have made `program` current.
    pub fn apply_uniform(
        &mut self,
        backend: &mut dyn UniformLocationBackend,
        program: ProgramHandle,
    ) -> Result<()> {
        let location = match self.binding {
            BackendBinding::Uniform { program: bound, location } if bound == program => location,
            _ => {
                let Some(location) = backend.uniform_location(program, self.layout.name())
                else {
                    // The program does not use this buffer; nothing to do.
                    return Ok(());
                };
                self.binding = BackendBinding::Uniform { program, location };
                // The program's uniform state is unknown; force an upload.
                self.dirty = true;
                location
            }
        };

        if !self.dirty {
            return Ok(());
        }

        // Upload the whole buffer as vec4 registers.
        let registers: Vec<f32> = self
            .buffer
            .chunks_exact(ELEMENT_SIZE)
            .map(bytemuck::pod_read_unaligned::<f32>)
            .collect();
        backend.set_vec4_array(location, &registers)?;

        self.dirty = false;
        Ok(())
    }
}

impl Clone for ConstantBuffer {
    /// Deep-copy the staging bytes; share the immutable layout
    ///
    /// The clone starts unbound and dirty: its contents have not been
    /// uploaded anywhere yet.
    fn clone(&self) -> Self {
        Self {
            layout: self.layout.clone(),
            buffer: self.buffer.clone(),
            state_key: self.state_key,
            dirty: true,
            binding: BackendBinding::Unbound,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "constant_buffer_tests.rs"]
mod tests;
