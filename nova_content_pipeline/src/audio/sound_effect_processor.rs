//! Sound effect processor
//!
//! Converts decoded audio into the packed format the runtime loads
//! directly. Best keeps 16-bit PCM untouched; Medium compresses to IMA
//! ADPCM; Low additionally halves the sample rate. Both compressed tiers
//! floor the target rate at 8 kHz.
//! Any conversion failure logs a warning and falls back to Best.

use nova_framework::nova_warn;

use crate::audio::adpcm::encode_ima_adpcm;
use crate::audio::resample::resample;
use crate::audio::AudioContent;
use crate::error::ConversionResult;

// ===== FORMAT TAGS =====

const FORMAT_PCM: u16 = 1;
const FORMAT_ADPCM: u16 = 2;

/// Lowest sample rate either compressed tier will emit
const MIN_SAMPLE_RATE: u32 = 8000;

// ===== QUALITY =====

/// Audio conversion quality tier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionQuality {
    /// Unmodified 16-bit PCM
    Best,
    /// ADPCM at the source rate
    Medium,
    /// ADPCM at half the source rate
    Low,
}

// ===== CONTENT =====

/// Processed sound effect, ready for the runtime loader
///
/// `format` holds the 16-byte wave format header the loader hands to the
/// platform mixer verbatim: format tag, channel count, sample rate,
/// average bytes per second, block align, bits per sample, all
/// little-endian.
pub struct SoundEffectContent {
    format: Vec<u8>,
    data: Vec<u8>,
    loop_start: u32,
    loop_length: u32,
    duration_ms: u32,
}

impl SoundEffectContent {
    pub fn new(
        format_tag: u16,
        channel_count: u16,
        sample_rate: u32,
        average_bytes_per_second: u32,
        block_align: u16,
        bits_per_sample: u16,
        data: Vec<u8>,
        loop_start: u32,
        loop_length: u32,
        duration_ms: u32,
    ) -> Self {
        let mut format = Vec::with_capacity(16);
        format.extend_from_slice(&format_tag.to_le_bytes());
        format.extend_from_slice(&channel_count.to_le_bytes());
        format.extend_from_slice(&sample_rate.to_le_bytes());
        format.extend_from_slice(&average_bytes_per_second.to_le_bytes());
        format.extend_from_slice(&block_align.to_le_bytes());
        format.extend_from_slice(&bits_per_sample.to_le_bytes());

        Self { format, data, loop_start, loop_length, duration_ms }
    }

    // ===== HEADER ACCESSORS =====

    fn header_u16(&self, offset: usize) -> u16 {
        u16::from_le_bytes([self.format[offset], self.format[offset + 1]])
    }

    fn header_u32(&self, offset: usize) -> u32 {
        u32::from_le_bytes([
            self.format[offset],
            self.format[offset + 1],
            self.format[offset + 2],
            self.format[offset + 3],
        ])
    }

    /// Wave format tag (1 = PCM, 2 = ADPCM)
    pub fn format_tag(&self) -> u16 { self.header_u16(0) }

    pub fn channel_count(&self) -> u16 { self.header_u16(2) }

    pub fn sample_rate(&self) -> u32 { self.header_u32(4) }

    pub fn average_bytes_per_second(&self) -> u32 { self.header_u32(8) }

    pub fn block_align(&self) -> u16 { self.header_u16(12) }

    pub fn bits_per_sample(&self) -> u16 { self.header_u16(14) }

    /// Raw 16-byte wave format header
    pub fn format(&self) -> &[u8] { &self.format }

    /// Encoded audio payload
    pub fn data(&self) -> &[u8] { &self.data }

    pub fn loop_start(&self) -> u32 { self.loop_start }

    pub fn loop_length(&self) -> u32 { self.loop_length }

    pub fn duration_ms(&self) -> u32 { self.duration_ms }
}

// ===== PROCESSOR =====

/// Offline audio processor with quality tiers
pub struct SoundEffectProcessor {
    quality: ConversionQuality,
}

impl SoundEffectProcessor {
    pub fn new(quality: ConversionQuality) -> Self {
        Self { quality }
    }

    pub fn quality(&self) -> ConversionQuality { self.quality }

    /// Process decoded audio at the configured quality
    ///
    /// Never fails: a conversion error at Medium or Low logs a warning
    /// and re-processes at Best.
    pub fn process(&self, content: &AudioContent) -> ConversionResult<SoundEffectContent> {
        match self.quality {
            ConversionQuality::Best => Self::process_base(content),
            ConversionQuality::Medium | ConversionQuality::Low => {
                match self.convert(content) {
                    Ok(output) => Ok(output),
                    Err(err) => {
                        nova_warn!(
                            "nova::SoundEffectProcessor",
                            "Failed to convert audio: {}. Falling back to Best quality.",
                            err
                        );
                        Self::process_base(content)
                    }
                }
            }
        }
    }

    /// Best tier: pack the PCM stream unmodified
    fn process_base(content: &AudioContent) -> ConversionResult<SoundEffectContent> {
        let format = content.format();
        let block_align = format.channel_count * 2;
        let data: Vec<u8> = content
            .samples()
            .iter()
            .flat_map(|s| s.to_le_bytes())
            .collect();

        Ok(SoundEffectContent::new(
            FORMAT_PCM,
            format.channel_count,
            format.sample_rate,
            format.sample_rate * block_align as u32,
            block_align,
            16,
            data,
            content.loop_start(),
            content.loop_length(),
            content.duration_ms(),
        ))
    }

    /// Medium/Low tier: downsample (Low only) then ADPCM-encode
    ///
    /// The target rate never drops below 8 kHz, whichever tier computed it.
    fn convert(&self, content: &AudioContent) -> ConversionResult<SoundEffectContent> {
        let source_rate = content.format().sample_rate;
        let target_rate = match self.quality {
            ConversionQuality::Low => (source_rate as f32 * 0.5) as u32,
            _ => source_rate,
        };
        let target_rate = MIN_SAMPLE_RATE.max(target_rate);

        let resampled = resample(content, target_rate)?;
        let stream = encode_ima_adpcm(&resampled)?;

        let format = resampled.format();
        let avg_bytes = target_rate * stream.block_align as u32
            / stream.samples_per_block as u32;

        Ok(SoundEffectContent::new(
            FORMAT_ADPCM,
            format.channel_count,
            target_rate,
            avg_bytes,
            stream.block_align,
            4,
            stream.data,
            resampled.loop_start(),
            resampled.loop_length(),
            resampled.duration_ms(),
        ))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "sound_effect_processor_tests.rs"]
mod tests;
