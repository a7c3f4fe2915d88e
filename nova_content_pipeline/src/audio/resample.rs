//! Linear sample-rate conversion
//!
//! Quality is adequate for the Low tier's half-rate downsample; anything
//! fancier belongs in the importer, not here.

use crate::audio::{AudioContent, AudioFormat};
use crate::error::{ConversionError, ConversionResult};

/// Resample interleaved PCM to a new rate
///
/// Returns the input unchanged when the rates already match. Loop
/// metadata is rescaled to the new rate.
pub fn resample(content: &AudioContent, target_rate: u32) -> ConversionResult<AudioContent> {
    if target_rate == 0 {
        return Err(ConversionError::InvalidInput(
            "Target sample rate must be non-zero".to_string(),
        ));
    }

    let source = content.format();
    if source.sample_rate == target_rate {
        let mut copy = AudioContent::new(*source, content.samples().to_vec())?;
        copy.set_loop_region(content.loop_start(), content.loop_length());
        return Ok(copy);
    }

    let channels = source.channel_count as usize;
    let in_frames = content.frame_count();
    let out_frames =
        (in_frames as u64 * target_rate as u64 / source.sample_rate as u64) as usize;

    let samples = content.samples();
    let mut out = Vec::with_capacity(out_frames * channels);
    for frame in 0..out_frames {
        // Source position in fixed-point frame space
        let pos = frame as u64 * source.sample_rate as u64;
        let src_frame = (pos / target_rate as u64) as usize;
        let frac = (pos % target_rate as u64) as f64 / target_rate as f64;

        let next_frame = (src_frame + 1).min(in_frames.saturating_sub(1));
        for ch in 0..channels {
            let a = samples[src_frame * channels + ch] as f64;
            let b = samples[next_frame * channels + ch] as f64;
            out.push((a + (b - a) * frac).round() as i16);
        }
    }

    let mut resampled = AudioContent::new(
        AudioFormat {
            sample_rate: target_rate,
            ..*source
        },
        out,
    )?;

    let scale = |frames: u32| {
        (frames as u64 * target_rate as u64 / source.sample_rate as u64) as u32
    };
    resampled.set_loop_region(scale(content.loop_start()), scale(content.loop_length()));

    Ok(resampled)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "resample_tests.rs"]
mod tests;
