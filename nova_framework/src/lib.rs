/*!
# Nova Framework

Core runtime types for the Nova game framework: shader effect parameters,
constant-buffer marshalling and the graphics backend capability traits.

This crate provides the platform-agnostic marshalling layer between typed
effect parameter values and the raw byte layouts GPU backends expect.
Backend implementations (Direct3D-style native constant buffers, GL-style
uniform locations) plug in through small capability traits.

## Architecture

- **EffectParameter**: typed accessors over one shader uniform value
- **EffectParameterCollection**: ordered, name-indexed parameter set
- **ConstantBuffer**: staged byte buffer with dirty tracking and upload
- **NativeConstantBufferBackend / UniformLocationBackend**: backend seams

The offline content pipeline lives in the `nova_content_pipeline` crate.
*/

// Internal modules
mod error;
pub mod log;
pub mod backend;
pub mod effect;

// Main nova namespace module
pub mod nova {
    // Error types
    pub use crate::error::{Error, Result};

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
        // Note: nova_* macros are NOT re-exported here - they are exported at crate root
    }

    // Backend capability traits and handle types
    pub mod backend {
        pub use crate::backend::*;
    }

    // Effect sub-module with parameter and constant-buffer types
    pub mod effect {
        pub use crate::effect::*;
    }
}

// Re-export math library at crate root
pub use glam;
