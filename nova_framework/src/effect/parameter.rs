/// Effect parameter - typed handle over one shader uniform value
///
/// A parameter owns a fixed-size byte region holding its packed value
/// (floats, 4-byte-encoded bools, matrices in register order). All
/// accessors encode/decode through that bounded region with explicit
/// length checks - there is no pointer reinterpretation anywhere.
///
/// Every successful write advances the parameter's state key from a
/// global monotonically increasing counter; constant buffers compare
/// state keys to skip parameters that did not change since their last
/// update.

use std::sync::atomic::{AtomicU64, Ordering};

use glam::{Mat4, Vec2, Vec3, Vec4};

use crate::backend::TextureHandle;
use crate::error::{Error, Result};
use crate::effect::parameter_collection::EffectParameterCollection;
use crate::nova_bail;

const SOURCE: &str = "nova::EffectParameter";

/// Bytes per packed element (f32 / i32 / bool-as-i32)
pub(crate) const ELEMENT_SIZE: usize = 4;

// ===== STATE KEYS =====

/// Global write counter shared by all parameters
static NEXT_STATE_KEY: AtomicU64 = AtomicU64::new(1);

/// Current value of the global write counter
///
/// A constant buffer caches this after an update; any parameter whose
/// state key is below the cached value has not changed since.
pub fn next_state_key() -> u64 {
    NEXT_STATE_KEY.load(Ordering::Relaxed)
}

// ===== PARAMETER CLASS / TYPE =====

/// Declared class of a parameter (its shape category)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectParameterClass {
    /// Single component (1x1)
    Scalar,
    /// One row of components (1xN)
    Vector,
    /// Rectangular component grid (NxM)
    Matrix,
    /// Object-table reference (texture, string, ...)
    Object,
    /// Nested structure with named members
    Struct,
}

/// Declared element type of a parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectParameterType {
    /// 32-bit float
    Single,
    /// 32-bit integer
    Int32,
    /// Boolean, encoded as a 4-byte integer (nonzero = true)
    Bool,
    /// String (object table, not marshalled)
    String,
    /// Texture (object table, not marshalled)
    Texture,
    /// 2D texture (object table, not marshalled)
    Texture2D,
    /// 3D texture (object table, not marshalled)
    Texture3D,
    /// Cube texture (object table, not marshalled)
    TextureCube,
}

// ===== ANNOTATIONS =====

/// Compiler-emitted parameter metadata, never consumed at runtime
#[derive(Debug, Clone)]
pub struct EffectAnnotation {
    pub name: String,
    pub value: String,
}

// ===== PARAMETER DESC =====

/// Descriptor for creating an EffectParameter
///
/// All fields come from the shader compiler's reflection output; this
/// crate consumes reflected metadata, it never compiles shaders.
pub struct EffectParameterDesc {
    pub name: String,
    pub semantic: Option<String>,
    pub class: EffectParameterClass,
    pub ty: EffectParameterType,
    /// Declared rows (1..=4)
    pub row_count: u32,
    /// Declared columns (1..=4)
    pub column_count: u32,
    /// Array element count; 0 for a non-array parameter
    pub element_count: u32,
    /// Register count from reflection; 0 when unknown (array elements)
    pub register_count: u32,
    /// Structure members (Struct class only)
    pub members: Option<EffectParameterCollection>,
    pub annotations: Vec<EffectAnnotation>,
}

impl EffectParameterDesc {
    /// Convenience descriptor for a float parameter of the given shape
    pub fn single(name: &str, row_count: u32, column_count: u32) -> Self {
        let class = match (row_count, column_count) {
            (1, 1) => EffectParameterClass::Scalar,
            (1, _) => EffectParameterClass::Vector,
            _ => EffectParameterClass::Matrix,
        };
        Self {
            name: name.to_string(),
            semantic: None,
            class,
            ty: EffectParameterType::Single,
            row_count,
            column_count,
            element_count: 0,
            register_count: row_count,
            members: None,
            annotations: Vec::new(),
        }
    }
}

// ===== PARAMETER =====

/// One shader uniform value with typed accessors
pub struct EffectParameter {
    name: String,
    semantic: Option<String>,
    class: EffectParameterClass,
    ty: EffectParameterType,
    row_count: u32,
    column_count: u32,
    element_count: u32,
    register_count: u32,
    members: Option<EffectParameterCollection>,
    annotations: Vec<EffectAnnotation>,
    /// Packed value region, fixed length for the parameter's lifetime.
    /// Empty for Object and Struct classes (no flat data).
    data: Vec<u8>,
    state_key: u64,
}

impl EffectParameter {
    pub fn from_desc(desc: EffectParameterDesc) -> Result<Self> {
        // ========== VALIDATION ==========
        if desc.name.is_empty() {
            nova_bail!(SOURCE, "Parameter must have a name");
        }
        if !(1..=4).contains(&desc.row_count) || !(1..=4).contains(&desc.column_count) {
            nova_bail!(SOURCE,
                "Parameter '{}' has invalid shape {}x{} (rows and columns must be 1..=4)",
                desc.name, desc.row_count, desc.column_count);
        }
        if desc.class == EffectParameterClass::Struct && desc.members.is_none() {
            nova_bail!(SOURCE,
                "Struct parameter '{}' must have structure members", desc.name);
        }

        // ========== ALLOCATE VALUE REGION ==========
        // Object and Struct parameters carry no flat data: objects live in
        // an external object table, struct data lives in the members.
        let data = match desc.class {
            EffectParameterClass::Object | EffectParameterClass::Struct => Vec::new(),
            _ => {
                let elements = desc.element_count.max(1) as usize;
                let len = desc.row_count as usize
                    * desc.column_count as usize
                    * ELEMENT_SIZE
                    * elements;
                vec![0u8; len]
            }
        };

        Ok(Self {
            name: desc.name,
            semantic: desc.semantic,
            class: desc.class,
            ty: desc.ty,
            row_count: desc.row_count,
            column_count: desc.column_count,
            element_count: desc.element_count,
            register_count: desc.register_count,
            members: desc.members,
            annotations: desc.annotations,
            data,
            state_key: 0,
        })
    }

    // ===== ACCESSORS =====

    /// Parameter name
    pub fn name(&self) -> &str { &self.name }

    /// Optional semantic tag (e.g. "WORLDVIEWPROJECTION")
    pub fn semantic(&self) -> Option<&str> { self.semantic.as_deref() }

    /// Declared class
    pub fn class(&self) -> EffectParameterClass { self.class }

    /// Declared element type
    pub fn parameter_type(&self) -> EffectParameterType { self.ty }

    /// Declared row count
    pub fn row_count(&self) -> u32 { self.row_count }

    /// Declared column count
    pub fn column_count(&self) -> u32 { self.column_count }

    /// Array element count (0 for non-array parameters)
    pub fn element_count(&self) -> u32 { self.element_count }

    /// Register count from shader reflection (0 when unknown)
    pub fn register_count(&self) -> u32 { self.register_count }

    /// Structure members (Struct class only)
    pub fn members(&self) -> Option<&EffectParameterCollection> { self.members.as_ref() }

    /// Mutable structure members (Struct class only)
    pub fn members_mut(&mut self) -> Option<&mut EffectParameterCollection> {
        self.members.as_mut()
    }

    /// Compiler annotations (metadata only)
    pub fn annotations(&self) -> &[EffectAnnotation] { &self.annotations }

    /// Packed value bytes (empty for Object/Struct parameters)
    pub fn data(&self) -> &[u8] { &self.data }

    /// State key of the last write
    pub fn state_key(&self) -> u64 { self.state_key }

    /// Mark the parameter as freshly written
    fn touch(&mut self) {
        // fetch_add returns the pre-increment value: the parameter takes
        // that key and the global counter moves past it, so a buffer that
        // caches next_state_key() afterwards sees this write as stale.
        self.state_key = NEXT_STATE_KEY.fetch_add(1, Ordering::Relaxed);
    }

    // ===== BOUNDED REGION ENCODE/DECODE =====

    /// Checked read of `count` consecutive f32 values starting at `index`
    fn read_f32s(&self, index: usize, count: usize) -> Result<Vec<f32>> {
        let start = index * ELEMENT_SIZE;
        let end = start + count * ELEMENT_SIZE;
        let Some(bytes) = self.data.get(start..end) else {
            nova_bail!(SOURCE,
                "Read of {} floats at element {} exceeds region of '{}' ({} bytes)",
                count, index, self.name, self.data.len());
        };
        Ok(bytes
            .chunks_exact(ELEMENT_SIZE)
            .map(bytemuck::pod_read_unaligned::<f32>)
            .collect())
    }

    /// Checked read of `count` consecutive i32 values starting at `index`
    fn read_i32s(&self, index: usize, count: usize) -> Result<Vec<i32>> {
        let start = index * ELEMENT_SIZE;
        let end = start + count * ELEMENT_SIZE;
        let Some(bytes) = self.data.get(start..end) else {
            nova_bail!(SOURCE,
                "Read of {} ints at element {} exceeds region of '{}' ({} bytes)",
                count, index, self.name, self.data.len());
        };
        Ok(bytes
            .chunks_exact(ELEMENT_SIZE)
            .map(bytemuck::pod_read_unaligned::<i32>)
            .collect())
    }

    /// Checked write of f32 values starting at element `index`
    fn write_f32s(&mut self, index: usize, values: &[f32]) -> Result<()> {
        let start = index * ELEMENT_SIZE;
        let end = start + values.len() * ELEMENT_SIZE;
        if end > self.data.len() {
            nova_bail!(SOURCE,
                "Write of {} floats at element {} exceeds region of '{}' ({} bytes)",
                values.len(), index, self.name, self.data.len());
        }
        self.data[start..end].copy_from_slice(bytemuck::cast_slice(values));
        Ok(())
    }

    /// Checked write of i32 values starting at element `index`
    fn write_i32s(&mut self, index: usize, values: &[i32]) -> Result<()> {
        let start = index * ELEMENT_SIZE;
        let end = start + values.len() * ELEMENT_SIZE;
        if end > self.data.len() {
            nova_bail!(SOURCE,
                "Write of {} ints at element {} exceeds region of '{}' ({} bytes)",
                values.len(), index, self.name, self.data.len());
        }
        self.data[start..end].copy_from_slice(bytemuck::cast_slice(values));
        Ok(())
    }

    // ===== BOOL =====

    /// Read a bool (4-byte integer encoding, nonzero = true)
    pub fn get_bool(&self) -> Result<bool> {
        Ok(self.read_i32s(0, 1)?[0] != 0)
    }

    /// Read `count` consecutive bools
    pub fn get_bool_array(&self, count: usize) -> Result<Vec<bool>> {
        Ok(self.read_i32s(0, count)?.into_iter().map(|v| v != 0).collect())
    }

    /// Write a bool
    pub fn set_bool(&mut self, value: bool) -> Result<()> {
        self.write_i32s(0, &[value as i32])?;
        self.touch();
        Ok(())
    }

    /// Write a bool array
    pub fn set_bool_array(&mut self, values: &[bool]) -> Result<()> {
        let encoded: Vec<i32> = values.iter().map(|&v| v as i32).collect();
        self.write_i32s(0, &encoded)?;
        self.touch();
        Ok(())
    }

    // ===== INT =====

    /// Read an i32
    pub fn get_i32(&self) -> Result<i32> {
        Ok(self.read_i32s(0, 1)?[0])
    }

    /// Read `count` consecutive i32 values
    pub fn get_i32_array(&self, count: usize) -> Result<Vec<i32>> {
        self.read_i32s(0, count)
    }

    /// Write an i32
    pub fn set_i32(&mut self, value: i32) -> Result<()> {
        self.write_i32s(0, &[value])?;
        self.touch();
        Ok(())
    }

    /// Write an i32 array
    pub fn set_i32_array(&mut self, values: &[i32]) -> Result<()> {
        self.write_i32s(0, values)?;
        self.touch();
        Ok(())
    }

    // ===== FLOAT =====

    /// Read an f32
    pub fn get_f32(&self) -> Result<f32> {
        Ok(self.read_f32s(0, 1)?[0])
    }

    /// Read `count` consecutive f32 values
    pub fn get_f32_array(&self, count: usize) -> Result<Vec<f32>> {
        self.read_f32s(0, count)
    }

    /// Write an f32
    pub fn set_f32(&mut self, value: f32) -> Result<()> {
        self.write_f32s(0, &[value])?;
        self.touch();
        Ok(())
    }

    /// Write an f32 array
    pub fn set_f32_array(&mut self, values: &[f32]) -> Result<()> {
        self.write_f32s(0, values)?;
        self.touch();
        Ok(())
    }

    // ===== VECTORS =====

    /// Read a Vec2 (2 packed floats)
    pub fn get_vec2(&self) -> Result<Vec2> {
        let v = self.read_f32s(0, 2)?;
        Ok(Vec2::new(v[0], v[1]))
    }

    /// Read `count` packed Vec2 values
    pub fn get_vec2_array(&self, count: usize) -> Result<Vec<Vec2>> {
        let v = self.read_f32s(0, count * 2)?;
        Ok(v.chunks_exact(2).map(|c| Vec2::new(c[0], c[1])).collect())
    }

    /// Write a Vec2
    pub fn set_vec2(&mut self, value: Vec2) -> Result<()> {
        self.write_f32s(0, &value.to_array())?;
        self.touch();
        Ok(())
    }

    /// Write a packed Vec2 array
    pub fn set_vec2_array(&mut self, values: &[Vec2]) -> Result<()> {
        let flat: Vec<f32> = values.iter().flat_map(|v| v.to_array()).collect();
        self.write_f32s(0, &flat)?;
        self.touch();
        Ok(())
    }

    /// Read a Vec3 (3 packed floats)
    pub fn get_vec3(&self) -> Result<Vec3> {
        let v = self.read_f32s(0, 3)?;
        Ok(Vec3::new(v[0], v[1], v[2]))
    }

    /// Read `count` packed Vec3 values
    pub fn get_vec3_array(&self, count: usize) -> Result<Vec<Vec3>> {
        let v = self.read_f32s(0, count * 3)?;
        Ok(v.chunks_exact(3).map(|c| Vec3::new(c[0], c[1], c[2])).collect())
    }

    /// Write a Vec3
    pub fn set_vec3(&mut self, value: Vec3) -> Result<()> {
        self.write_f32s(0, &value.to_array())?;
        self.touch();
        Ok(())
    }

    /// Write a packed Vec3 array
    pub fn set_vec3_array(&mut self, values: &[Vec3]) -> Result<()> {
        let flat: Vec<f32> = values.iter().flat_map(|v| v.to_array()).collect();
        self.write_f32s(0, &flat)?;
        self.touch();
        Ok(())
    }

    /// Read a Vec4 (4 packed floats)
    pub fn get_vec4(&self) -> Result<Vec4> {
        let v = self.read_f32s(0, 4)?;
        Ok(Vec4::new(v[0], v[1], v[2], v[3]))
    }

    /// Read `count` packed Vec4 values
    pub fn get_vec4_array(&self, count: usize) -> Result<Vec<Vec4>> {
        let v = self.read_f32s(0, count * 4)?;
        Ok(v.chunks_exact(4).map(|c| Vec4::new(c[0], c[1], c[2], c[3])).collect())
    }

    /// Write a Vec4
    pub fn set_vec4(&mut self, value: Vec4) -> Result<()> {
        self.write_f32s(0, &value.to_array())?;
        self.touch();
        Ok(())
    }

    /// Write a packed Vec4 array
    pub fn set_vec4_array(&mut self, values: &[Vec4]) -> Result<()> {
        let flat: Vec<f32> = values.iter().flat_map(|v| v.to_array()).collect();
        self.write_f32s(0, &flat)?;
        self.touch();
        Ok(())
    }

    // ===== MATRICES =====
    //
    // The region holds 4x4 matrices in register order: each group of four
    // floats is one register holding one column of the matrix. That is the
    // transpose of glam's column-major array when the matrix is read in the
    // usual row-vector convention, so set_matrix stores the transposed
    // array and set_matrix_transpose stores glam's array directly.

    /// Read a 4x4 matrix (register-order storage)
    pub fn get_matrix(&self) -> Result<Mat4> {
        let v = self.read_f32s(0, 16)?;
        let mut arr = [0f32; 16];
        arr.copy_from_slice(&v);
        Ok(Mat4::from_cols_array(&arr).transpose())
    }

    /// Read `count` consecutive 4x4 matrices
    pub fn get_matrix_array(&self, count: usize) -> Result<Vec<Mat4>> {
        let v = self.read_f32s(0, count * 16)?;
        Ok(v.chunks_exact(16)
            .map(|c| {
                let mut arr = [0f32; 16];
                arr.copy_from_slice(c);
                Mat4::from_cols_array(&arr).transpose()
            })
            .collect())
    }

    /// Read a 4x4 matrix without the register-order conversion
    pub fn get_matrix_transpose(&self) -> Result<Mat4> {
        let v = self.read_f32s(0, 16)?;
        let mut arr = [0f32; 16];
        arr.copy_from_slice(&v);
        Ok(Mat4::from_cols_array(&arr))
    }

    /// Read `count` matrices without the register-order conversion
    pub fn get_matrix_transpose_array(&self, count: usize) -> Result<Vec<Mat4>> {
        let v = self.read_f32s(0, count * 16)?;
        Ok(v.chunks_exact(16)
            .map(|c| {
                let mut arr = [0f32; 16];
                arr.copy_from_slice(c);
                Mat4::from_cols_array(&arr)
            })
            .collect())
    }

    /// Write a 4x4 matrix in register order
    pub fn set_matrix(&mut self, value: Mat4) -> Result<()> {
        self.write_f32s(0, &value.transpose().to_cols_array())?;
        self.touch();
        Ok(())
    }

    /// Write consecutive 4x4 matrices in register order
    pub fn set_matrix_array(&mut self, values: &[Mat4]) -> Result<()> {
        let flat: Vec<f32> = values
            .iter()
            .flat_map(|m| m.transpose().to_cols_array())
            .collect();
        self.write_f32s(0, &flat)?;
        self.touch();
        Ok(())
    }

    /// Write a 4x4 matrix without the register-order conversion
    ///
    /// Used when the backend's memory order already matches, avoiding a
    /// transpose on both sides.
    pub fn set_matrix_transpose(&mut self, value: Mat4) -> Result<()> {
        self.write_f32s(0, &value.to_cols_array())?;
        self.touch();
        Ok(())
    }

    /// Write consecutive matrices without the register-order conversion
    pub fn set_matrix_transpose_array(&mut self, values: &[Mat4]) -> Result<()> {
        let flat: Vec<f32> = values.iter().flat_map(|m| m.to_cols_array()).collect();
        self.write_f32s(0, &flat)?;
        self.touch();
        Ok(())
    }

    // ===== OBJECT-TABLE KINDS (not modeled) =====
    //
    // These value kinds need indirection through an effect object table,
    // which flat byte parameters do not carry.

    /// Strings require object-table indirection
    pub fn get_string(&self) -> Result<String> {
        Err(Error::NotSupported(format!(
            "String value of parameter '{}'", self.name)))
    }

    /// Strings require object-table indirection
    pub fn set_string(&mut self, _value: &str) -> Result<()> {
        Err(Error::NotSupported(format!(
            "String value of parameter '{}'", self.name)))
    }

    /// Textures require object-table indirection
    pub fn get_texture(&self) -> Result<TextureHandle> {
        Err(Error::NotSupported(format!(
            "Texture value of parameter '{}'", self.name)))
    }

    /// Textures require object-table indirection
    pub fn set_texture(&mut self, _value: TextureHandle) -> Result<()> {
        Err(Error::NotSupported(format!(
            "Texture value of parameter '{}'", self.name)))
    }

    /// Quaternions are not an effect value kind
    pub fn get_quaternion(&self) -> Result<Vec4> {
        Err(Error::NotSupported(format!(
            "Quaternion value of parameter '{}'", self.name)))
    }

    /// Quaternions are not an effect value kind
    pub fn set_quaternion(&mut self, _value: Vec4) -> Result<()> {
        Err(Error::NotSupported(format!(
            "Quaternion value of parameter '{}'", self.name)))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "parameter_tests.rs"]
mod tests;
