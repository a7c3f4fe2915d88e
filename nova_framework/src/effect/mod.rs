//! Effect module
//!
//! Typed shader parameters and the constant-buffer marshalling path that
//! carries their values to a graphics backend.

pub mod parameter;
pub mod parameter_collection;
pub mod constant_buffer;
pub mod resources;

pub use parameter::{
    EffectAnnotation, EffectParameter, EffectParameterClass,
    EffectParameterDesc, EffectParameterType,
};
pub use parameter_collection::EffectParameterCollection;
pub use constant_buffer::{ConstantBuffer, ConstantBufferLayout, LayoutEntry};
