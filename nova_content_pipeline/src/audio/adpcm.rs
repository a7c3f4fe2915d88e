//! IMA ADPCM encoding
//!
//! Produces the block layout consumed by the runtime mixer: fixed
//! 256-byte-per-channel blocks, each opening with a per-channel header
//! (predictor, step index) followed by packed 4-bit nibbles. Stereo
//! nibbles are interleaved in 4-byte groups per channel.

use crate::audio::AudioContent;
use crate::error::{ConversionError, ConversionResult};

// ===== CONSTANTS =====

/// Bytes per channel per block
const BLOCK_BYTES_PER_CHANNEL: usize = 256;

/// Per-channel block header: predictor i16, step index u8, reserved u8
const HEADER_BYTES_PER_CHANNEL: usize = 4;

/// PCM frames encoded by one block: header seeds one sample, the
/// remaining payload holds two nibbles per byte
pub const SAMPLES_PER_BLOCK: usize =
    (BLOCK_BYTES_PER_CHANNEL - HEADER_BYTES_PER_CHANNEL) * 2 + 1;

const STEP_TABLE: [i32; 89] = [
    7, 8, 9, 10, 11, 12, 13, 14, 16, 17, 19, 21, 23, 25, 28, 31, 34, 37, 41, 45, 50,
    55, 60, 66, 73, 80, 88, 97, 107, 118, 130, 143, 157, 173, 190, 209, 230, 253, 279,
    307, 337, 371, 408, 449, 494, 544, 598, 658, 724, 796, 876, 963, 1060, 1166, 1282,
    1411, 1552, 1707, 1878, 2066, 2272, 2499, 2749, 3024, 3327, 3660, 4026, 4428,
    4871, 5358, 5894, 6484, 7132, 7845, 8630, 9493, 10442, 11487, 12635, 13899, 15289,
    16818, 18500, 20350, 22385, 24623, 27086, 29794, 32767,
];

const INDEX_TABLE: [i32; 8] = [-1, -1, -1, -1, 2, 4, 6, 8];

// ===== ENCODER =====

/// Encoded ADPCM stream plus the block geometry needed for the header
pub struct AdpcmStream {
    /// Packed block data
    pub data: Vec<u8>,
    /// Bytes per encoded block, all channels
    pub block_align: u16,
    /// PCM frames per encoded block
    pub samples_per_block: u16,
}

/// Per-channel predictor state
struct ChannelState {
    predictor: i32,
    step_index: i32,
}

impl ChannelState {
    fn new(seed: i16) -> Self {
        Self { predictor: seed as i32, step_index: 0 }
    }

    /// Quantize one sample to a nibble, updating the predictor
    fn encode(&mut self, sample: i16) -> u8 {
        let step = STEP_TABLE[self.step_index as usize];
        let diff = sample as i32 - self.predictor;

        let mut nibble: u8 = if diff < 0 { 8 } else { 0 };
        let mut remaining = diff.abs();
        let mut delta = step >> 3;

        if remaining >= step {
            nibble |= 4;
            remaining -= step;
            delta += step;
        }
        if remaining >= step >> 1 {
            nibble |= 2;
            remaining -= step >> 1;
            delta += step >> 1;
        }
        if remaining >= step >> 2 {
            nibble |= 1;
            delta += step >> 2;
        }

        if nibble & 8 != 0 {
            self.predictor -= delta;
        } else {
            self.predictor += delta;
        }
        self.predictor = self.predictor.clamp(i16::MIN as i32, i16::MAX as i32);

        self.step_index =
            (self.step_index + INDEX_TABLE[(nibble & 7) as usize]).clamp(0, 88);

        nibble
    }
}

/// Encode interleaved 16-bit PCM to IMA ADPCM blocks
///
/// Mono and stereo only; the final partial block is padded with the last
/// sample value so the decoder never sees a short block.
pub fn encode_ima_adpcm(content: &AudioContent) -> ConversionResult<AdpcmStream> {
    let channels = content.format().channel_count as usize;
    if channels == 0 || channels > 2 {
        return Err(ConversionError::UnsupportedFormat(format!(
            "ADPCM encoding supports mono and stereo only, got {} channels",
            channels
        )));
    }

    let samples = content.samples();
    let frames = content.frame_count();
    let block_align = (BLOCK_BYTES_PER_CHANNEL * channels) as u16;

    if frames == 0 {
        return Ok(AdpcmStream {
            data: Vec::new(),
            block_align,
            samples_per_block: SAMPLES_PER_BLOCK as u16,
        });
    }

    let block_count = (frames + SAMPLES_PER_BLOCK - 1) / SAMPLES_PER_BLOCK;
    let mut data = Vec::with_capacity(block_count * block_align as usize);

    let sample_at = |frame: usize, ch: usize| -> i16 {
        // Pad past-the-end reads with the final frame
        let frame = frame.min(frames - 1);
        samples[frame * channels + ch]
    };

    for block in 0..block_count {
        let base = block * SAMPLES_PER_BLOCK;

        // Headers seed each channel's predictor with the first frame
        let mut states: Vec<ChannelState> = (0..channels)
            .map(|ch| ChannelState::new(sample_at(base, ch)))
            .collect();
        for state in &states {
            data.extend_from_slice(&(state.predictor as i16).to_le_bytes());
            data.push(state.step_index as u8);
            data.push(0);
        }

        // Payload: nibbles in 4-byte groups per channel, 8 samples each
        let payload_samples = SAMPLES_PER_BLOCK - 1;
        for group in 0..payload_samples / 8 {
            let first = base + 1 + group * 8;
            for (ch, state) in states.iter_mut().enumerate() {
                for pair in 0..4 {
                    let lo = state.encode(sample_at(first + pair * 2, ch));
                    let hi = state.encode(sample_at(first + pair * 2 + 1, ch));
                    data.push(lo | (hi << 4));
                }
            }
        }
    }

    Ok(AdpcmStream {
        data,
        block_align,
        samples_per_block: SAMPLES_PER_BLOCK as u16,
    })
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "adpcm_tests.rs"]
mod tests;
