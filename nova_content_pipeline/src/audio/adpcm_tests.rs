use super::*;
use crate::audio::AudioFormat;

fn content(channels: u16, samples: Vec<i16>) -> AudioContent {
    AudioContent::new(
        AudioFormat {
            channel_count: channels,
            sample_rate: 44100,
            bits_per_sample: 16,
        },
        samples,
    )
    .unwrap()
}

/// Reference decoder, used to check the encoder tracks its own predictor
struct Decoder {
    predictor: i32,
    step_index: i32,
}

impl Decoder {
    fn new(predictor: i16, step_index: u8) -> Self {
        Self { predictor: predictor as i32, step_index: step_index as i32 }
    }

    fn decode(&mut self, nibble: u8) -> i16 {
        const STEPS: [i32; 89] = [
            7, 8, 9, 10, 11, 12, 13, 14, 16, 17, 19, 21, 23, 25, 28, 31, 34, 37, 41,
            45, 50, 55, 60, 66, 73, 80, 88, 97, 107, 118, 130, 143, 157, 173, 190,
            209, 230, 253, 279, 307, 337, 371, 408, 449, 494, 544, 598, 658, 724, 796,
            876, 963, 1060, 1166, 1282, 1411, 1552, 1707, 1878, 2066, 2272, 2499,
            2749, 3024, 3327, 3660, 4026, 4428, 4871, 5358, 5894, 6484, 7132, 7845,
            8630, 9493, 10442, 11487, 12635, 13899, 15289, 16818, 18500, 20350, 22385,
            24623, 27086, 29794, 32767,
        ];
        const INDEX: [i32; 8] = [-1, -1, -1, -1, 2, 4, 6, 8];

        let step = STEPS[self.step_index as usize];
        let mut delta = step >> 3;
        if nibble & 1 != 0 { delta += step >> 2; }
        if nibble & 2 != 0 { delta += step >> 1; }
        if nibble & 4 != 0 { delta += step; }
        if nibble & 8 != 0 {
            self.predictor -= delta;
        } else {
            self.predictor += delta;
        }
        self.predictor = self.predictor.clamp(i16::MIN as i32, i16::MAX as i32);
        self.step_index = (self.step_index + INDEX[(nibble & 7) as usize]).clamp(0, 88);
        self.predictor as i16
    }
}

// ===== GEOMETRY =====

#[test]
fn test_samples_per_block() {
    assert_eq!(SAMPLES_PER_BLOCK, 505);
}

#[test]
fn test_block_align_mono_and_stereo() {
    let mono = encode_ima_adpcm(&content(1, vec![0i16; 100])).unwrap();
    assert_eq!(mono.block_align, 256);
    assert_eq!(mono.samples_per_block, 505);

    let stereo = encode_ima_adpcm(&content(2, vec![0i16; 200])).unwrap();
    assert_eq!(stereo.block_align, 512);
    assert_eq!(stereo.samples_per_block, 505);
}

#[test]
fn test_output_is_whole_blocks() {
    // 100 frames still produce one full padded block
    let stream = encode_ima_adpcm(&content(1, vec![0i16; 100])).unwrap();
    assert_eq!(stream.data.len(), 256);

    // 506 frames spill into a second block
    let stream = encode_ima_adpcm(&content(1, vec![0i16; 506])).unwrap();
    assert_eq!(stream.data.len(), 512);

    // Exactly one block's worth
    let stream = encode_ima_adpcm(&content(1, vec![0i16; 505])).unwrap();
    assert_eq!(stream.data.len(), 256);
}

#[test]
fn test_empty_input_produces_no_blocks() {
    let stream = encode_ima_adpcm(&content(1, Vec::new())).unwrap();
    assert!(stream.data.is_empty());
    assert_eq!(stream.block_align, 256);
}

#[test]
fn test_rejects_more_than_two_channels() {
    let result = encode_ima_adpcm(&content(6, vec![0i16; 60]));
    assert!(matches!(
        result,
        Err(crate::error::ConversionError::UnsupportedFormat(_))
    ));
}

// ===== HEADERS =====

#[test]
fn test_header_seeds_first_sample() {
    let mut samples = vec![0i16; 505];
    samples[0] = 1234;
    let stream = encode_ima_adpcm(&content(1, samples)).unwrap();

    let predictor = i16::from_le_bytes([stream.data[0], stream.data[1]]);
    assert_eq!(predictor, 1234);
    assert_eq!(stream.data[2], 0); // initial step index
    assert_eq!(stream.data[3], 0); // reserved
}

#[test]
fn test_stereo_headers_are_per_channel() {
    let mut samples = vec![0i16; 1010];
    samples[0] = 111; // left, frame 0
    samples[1] = -222; // right, frame 0
    let stream = encode_ima_adpcm(&content(2, samples)).unwrap();

    let left = i16::from_le_bytes([stream.data[0], stream.data[1]]);
    let right = i16::from_le_bytes([stream.data[4], stream.data[5]]);
    assert_eq!(left, 111);
    assert_eq!(right, -222);
}

// ===== ROUND TRIP =====

#[test]
fn test_silence_encodes_to_silence() {
    let stream = encode_ima_adpcm(&content(1, vec![0i16; 505])).unwrap();
    let mut decoder = Decoder::new(
        i16::from_le_bytes([stream.data[0], stream.data[1]]),
        stream.data[2],
    );
    for &byte in &stream.data[4..] {
        for nibble in [byte & 0x0f, byte >> 4] {
            let sample = decoder.decode(nibble);
            // Silence stays within the smallest quantization step
            assert!(sample.abs() <= 2, "decoded {} from silence", sample);
        }
    }
}

#[test]
fn test_sine_round_trip_stays_close() {
    let samples: Vec<i16> = (0..505)
        .map(|i| {
            let t = i as f64 / 44100.0;
            ((t * 100.0 * 2.0 * std::f64::consts::PI).sin() * 2000.0) as i16
        })
        .collect();
    let original = samples.clone();
    let stream = encode_ima_adpcm(&content(1, samples)).unwrap();

    let mut decoder = Decoder::new(
        i16::from_le_bytes([stream.data[0], stream.data[1]]),
        stream.data[2],
    );
    let mut decoded = vec![original[0]];
    for &byte in &stream.data[4..] {
        decoded.push(decoder.decode(byte & 0x0f));
        decoded.push(decoder.decode(byte >> 4));
    }

    // 4-bit ADPCM on a slow sine should track within a small tolerance
    for (i, (&want, &got)) in original.iter().zip(decoded.iter()).enumerate() {
        let diff = (want as i32 - got as i32).abs();
        assert!(diff < 256, "sample {}: want {}, got {}, diff {}", i, want, got, diff);
    }
}
