/// Backend module - capability traits and handle types for graphics backends

// Module declarations
pub mod graphics_backend;

#[cfg(test)]
pub mod mock_backend;

// Re-export everything from graphics_backend.rs
pub use graphics_backend::*;
