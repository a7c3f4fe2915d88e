/// Decoded audio content handed to content processors
///
/// Samples are interleaved 16-bit PCM regardless of the source container;
/// the importer normalizes other widths on decode.

use std::io::Cursor;

use crate::error::{ConversionError, ConversionResult};

// ===== FORMAT =====

/// PCM stream format description
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioFormat {
    /// Interleaved channel count
    pub channel_count: u16,
    /// Frames per second
    pub sample_rate: u32,
    /// Bits per (decoded) sample
    pub bits_per_sample: u16,
}

impl AudioFormat {
    /// Bytes per interleaved frame
    pub fn block_align(&self) -> u16 {
        self.channel_count * (self.bits_per_sample / 8)
    }

    /// Bytes per second of audio
    pub fn average_bytes_per_second(&self) -> u32 {
        self.sample_rate * self.block_align() as u32
    }
}

// ===== CONTENT =====

/// Decoded audio stream plus loop metadata
pub struct AudioContent {
    format: AudioFormat,
    /// Interleaved 16-bit samples
    samples: Vec<i16>,
    loop_start: u32,
    loop_length: u32,
    duration_ms: u32,
}

impl AudioContent {
    /// Wrap decoded samples, deriving duration and default loop region
    pub fn new(format: AudioFormat, samples: Vec<i16>) -> ConversionResult<Self> {
        if format.channel_count == 0 {
            return Err(ConversionError::InvalidInput(
                "Audio content must have at least one channel".to_string(),
            ));
        }
        if format.sample_rate == 0 {
            return Err(ConversionError::InvalidInput(
                "Audio content must have a non-zero sample rate".to_string(),
            ));
        }
        if samples.len() % format.channel_count as usize != 0 {
            return Err(ConversionError::InvalidInput(format!(
                "Sample count {} is not a whole number of {}-channel frames",
                samples.len(),
                format.channel_count
            )));
        }

        let frames = (samples.len() / format.channel_count as usize) as u64;
        let duration_ms = (frames * 1000 / format.sample_rate as u64) as u32;

        Ok(Self {
            format,
            samples,
            loop_start: 0,
            loop_length: frames as u32,
            duration_ms,
        })
    }

    /// Decode WAV container bytes
    ///
    /// Integer sources are rescaled to 16 bits, float sources are
    /// clamped and quantized.
    pub fn from_wav_bytes(bytes: &[u8]) -> ConversionResult<Self> {
        let reader = hound::WavReader::new(Cursor::new(bytes))?;
        let spec = reader.spec();

        let samples: Vec<i16> = match spec.sample_format {
            hound::SampleFormat::Float => reader
                .into_samples::<f32>()
                .map(|s| s.map(|v| (v.clamp(-1.0, 1.0) * i16::MAX as f32) as i16))
                .collect::<Result<_, _>>()?,
            hound::SampleFormat::Int => {
                let bits = spec.bits_per_sample;
                reader
                    .into_samples::<i32>()
                    .map(|s| {
                        s.map(|v| {
                            if bits > 16 {
                                (v >> (bits - 16)) as i16
                            } else {
                                (v << (16 - bits)) as i16
                            }
                        })
                    })
                    .collect::<Result<_, _>>()?
            }
        };

        Self::new(
            AudioFormat {
                channel_count: spec.channels,
                sample_rate: spec.sample_rate,
                bits_per_sample: 16,
            },
            samples,
        )
    }

    // ===== ACCESSORS =====

    /// Stream format
    pub fn format(&self) -> &AudioFormat { &self.format }

    /// Interleaved 16-bit samples
    pub fn samples(&self) -> &[i16] { &self.samples }

    /// Number of interleaved frames
    pub fn frame_count(&self) -> usize {
        self.samples.len() / self.format.channel_count as usize
    }

    /// Loop region start, in frames
    pub fn loop_start(&self) -> u32 { self.loop_start }

    /// Loop region length, in frames
    pub fn loop_length(&self) -> u32 { self.loop_length }

    /// Stream duration in milliseconds
    pub fn duration_ms(&self) -> u32 { self.duration_ms }

    /// Override the loop region (from importer metadata)
    pub fn set_loop_region(&mut self, start: u32, length: u32) {
        self.loop_start = start;
        self.loop_length = length;
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "audio_content_tests.rs"]
mod tests;
