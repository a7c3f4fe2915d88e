/*!
# Nova Content Pipeline

Offline content processors for the Nova game framework.

This crate runs at build time, never at runtime. The audio processor
converts decoded audio into the packed sound-effect format the runtime
consumes: 16-bit PCM at Best quality, IMA-ADPCM at Medium and Low, with
the sample rate halved at Low. Any conversion failure downgrades to Best
and retries through the unmodified base path, trading size for
robustness.
*/

// Internal modules
mod error;
pub mod audio;

// Main nova namespace module
pub mod nova {
    // Error types
    pub use crate::error::{ConversionError, ConversionResult};

    // Audio processing sub-module
    pub mod audio {
        pub use crate::audio::*;
    }
}
