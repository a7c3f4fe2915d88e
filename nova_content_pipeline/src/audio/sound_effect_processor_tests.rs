use super::*;
use crate::audio::{AudioContent, AudioFormat};

fn content(channels: u16, rate: u32, samples: Vec<i16>) -> AudioContent {
    AudioContent::new(
        AudioFormat {
            channel_count: channels,
            sample_rate: rate,
            bits_per_sample: 16,
        },
        samples,
    )
    .unwrap()
}

// ===== CONTENT HEADER =====

#[test]
fn test_header_is_sixteen_bytes_little_endian() {
    let output = SoundEffectContent::new(
        1, 2, 44100, 176400, 4, 16,
        Vec::new(), 0, 0, 0,
    );
    let header = output.format();
    assert_eq!(header.len(), 16);
    assert_eq!(&header[0..2], &[1, 0]); // format tag
    assert_eq!(&header[2..4], &[2, 0]); // channels
    assert_eq!(&header[4..8], &44100u32.to_le_bytes()); // sample rate
    assert_eq!(&header[8..12], &176400u32.to_le_bytes()); // avg bytes/sec
    assert_eq!(&header[12..14], &[4, 0]); // block align
    assert_eq!(&header[14..16], &[16, 0]); // bits per sample
}

#[test]
fn test_header_accessors_read_back_fields() {
    let output = SoundEffectContent::new(
        2, 1, 22050, 11289, 512, 4,
        vec![0xab; 8], 10, 20, 30,
    );
    assert_eq!(output.format_tag(), 2);
    assert_eq!(output.channel_count(), 1);
    assert_eq!(output.sample_rate(), 22050);
    assert_eq!(output.average_bytes_per_second(), 11289);
    assert_eq!(output.block_align(), 512);
    assert_eq!(output.bits_per_sample(), 4);
    assert_eq!(output.data(), &[0xab; 8]);
    assert_eq!(output.loop_start(), 10);
    assert_eq!(output.loop_length(), 20);
    assert_eq!(output.duration_ms(), 30);
}

// ===== BEST =====

#[test]
fn test_best_is_pcm_passthrough() {
    let input = content(1, 44100, vec![100, -200, 300, -400]);
    let output = SoundEffectProcessor::new(ConversionQuality::Best)
        .process(&input)
        .unwrap();

    assert_eq!(output.format_tag(), 1);
    assert_eq!(output.channel_count(), 1);
    assert_eq!(output.sample_rate(), 44100);
    assert_eq!(output.block_align(), 2);
    assert_eq!(output.average_bytes_per_second(), 88200);
    assert_eq!(output.bits_per_sample(), 16);

    let mut expected = Vec::new();
    for s in [100i16, -200, 300, -400] {
        expected.extend_from_slice(&s.to_le_bytes());
    }
    assert_eq!(output.data(), expected.as_slice());
}

#[test]
fn test_best_preserves_loop_and_duration() {
    let mut input = content(2, 44100, vec![0i16; 88200]);
    input.set_loop_region(1000, 2000);
    let output = SoundEffectProcessor::new(ConversionQuality::Best)
        .process(&input)
        .unwrap();

    assert_eq!(output.loop_start(), 1000);
    assert_eq!(output.loop_length(), 2000);
    assert_eq!(output.duration_ms(), 1000);
    assert_eq!(output.block_align(), 4);
}

// ===== MEDIUM =====

#[test]
fn test_medium_is_adpcm_at_source_rate() {
    let input = content(1, 44100, vec![0i16; 2048]);
    let output = SoundEffectProcessor::new(ConversionQuality::Medium)
        .process(&input)
        .unwrap();

    assert_eq!(output.format_tag(), 2);
    assert_eq!(output.sample_rate(), 44100);
    assert_eq!(output.block_align(), 256);
    assert_eq!(output.bits_per_sample(), 4);
    assert_eq!(output.average_bytes_per_second(), 44100 * 256 / 505);
    // 2048 frames = 5 padded blocks
    assert_eq!(output.data().len(), 5 * 256);
}

#[test]
fn test_medium_raises_sub_floor_rate() {
    // The 8 kHz floor is not a Low-tier special case: a sub-floor source
    // is resampled up before encoding at Medium too
    let input = content(1, 6000, vec![0i16; 1024]);
    let output = SoundEffectProcessor::new(ConversionQuality::Medium)
        .process(&input)
        .unwrap();
    assert_eq!(output.format_tag(), 2);
    assert_eq!(output.sample_rate(), 8000);
}

#[test]
fn test_medium_stereo_block_align() {
    let input = content(2, 44100, vec![0i16; 4096]);
    let output = SoundEffectProcessor::new(ConversionQuality::Medium)
        .process(&input)
        .unwrap();
    assert_eq!(output.channel_count(), 2);
    assert_eq!(output.block_align(), 512);
}

// ===== LOW =====

#[test]
fn test_low_halves_the_sample_rate() {
    let input = content(1, 44100, vec![0i16; 4410]);
    let output = SoundEffectProcessor::new(ConversionQuality::Low)
        .process(&input)
        .unwrap();

    assert_eq!(output.format_tag(), 2);
    assert_eq!(output.sample_rate(), 22050);
}

#[test]
fn test_low_floors_at_eight_khz() {
    // Half of 11025 is below the floor
    let input = content(1, 11025, vec![0i16; 1024]);
    let output = SoundEffectProcessor::new(ConversionQuality::Low)
        .process(&input)
        .unwrap();
    assert_eq!(output.sample_rate(), 8000);

    // Already below the floor: no upsampling past the source rate either,
    // the floor simply wins over the halved rate
    let input = content(1, 6000, vec![0i16; 1024]);
    let output = SoundEffectProcessor::new(ConversionQuality::Low)
        .process(&input)
        .unwrap();
    assert_eq!(output.sample_rate(), 8000);
}

#[test]
fn test_low_odd_rate_truncates() {
    let input = content(1, 22051, vec![0i16; 1024]);
    let output = SoundEffectProcessor::new(ConversionQuality::Low)
        .process(&input)
        .unwrap();
    assert_eq!(output.sample_rate(), 11025);
}

// ===== FALLBACK =====

#[test]
fn test_fallback_matches_best_exactly() {
    // Six channels cannot be ADPCM-encoded, so Medium falls back
    let input = content(6, 44100, vec![0i16, 1, 2, 3, 4, 5].repeat(32));
    let medium = SoundEffectProcessor::new(ConversionQuality::Medium)
        .process(&input)
        .unwrap();
    let best = SoundEffectProcessor::new(ConversionQuality::Best)
        .process(&input)
        .unwrap();

    assert_eq!(medium.format(), best.format());
    assert_eq!(medium.data(), best.data());
    assert_eq!(medium.format_tag(), 1);
    assert_eq!(medium.loop_start(), best.loop_start());
    assert_eq!(medium.loop_length(), best.loop_length());
    assert_eq!(medium.duration_ms(), best.duration_ms());
}

#[test]
fn test_low_fallback_keeps_source_rate() {
    // The fallback path never resamples
    let input = content(6, 44100, vec![0i16; 600]);
    let output = SoundEffectProcessor::new(ConversionQuality::Low)
        .process(&input)
        .unwrap();
    assert_eq!(output.format_tag(), 1);
    assert_eq!(output.sample_rate(), 44100);
    assert_eq!(output.bits_per_sample(), 16);
}
