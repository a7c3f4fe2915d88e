//! Audio processing module
//!
//! Decoded audio content, the quality-tiered sound-effect processor and
//! its conversion internals (resampling, IMA-ADPCM encoding).

pub mod audio_content;
pub mod adpcm;
pub mod resample;
pub mod sound_effect_processor;

pub use audio_content::{AudioContent, AudioFormat};
pub use adpcm::{AdpcmStream, encode_ima_adpcm};
pub use resample::resample;
pub use sound_effect_processor::{
    ConversionQuality, SoundEffectContent, SoundEffectProcessor,
};
