//! 16-bit PCM stereo WAV encoding.
//!
//! Output is the canonical 44-byte header followed by little-endian samples:
//!
//! | offset | field           | value                 |
//! | ------ | --------------- | --------------------- |
//! | 0      | `RIFF`          | chunk size = 36 + data |
//! | 8      | `WAVE`          |                       |
//! | 12     | `fmt ` (16)     | PCM, 2 ch, rate       |
//! | 28     | byte rate       | rate * 4              |
//! | 32     | block align     | 4                     |
//! | 34     | bits per sample | 16                    |
//! | 36     | `data`          | len = samples * 2     |

use std::io::Cursor;

use hound::{SampleFormat, WavSpec, WavWriter};

pub const CHANNELS: u16 = 2;
pub const BITS_PER_SAMPLE: u16 = 16;
pub const HEADER_LEN: usize = 44;

/// Encode interleaved stereo samples at `sample_rate`.
pub fn encode(interleaved: &[f32], sample_rate: u32) -> crate::Result<Vec<u8>> {
    let spec = WavSpec {
        channels: CHANNELS,
        sample_rate,
        bits_per_sample: BITS_PER_SAMPLE,
        sample_format: SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::with_capacity(HEADER_LEN + interleaved.len() * 2));
    let mut writer = WavWriter::new(&mut cursor, spec)?;
    for &sample in interleaved {
        writer.write_sample(to_pcm16(sample))?;
    }
    writer.finalize()?;

    Ok(cursor.into_inner())
}

/// A zero-length take.
pub fn empty(sample_rate: u32) -> crate::Result<Vec<u8>> {
    encode(&[], sample_rate)
}

/// Clamp to [-1, 1]; negatives scale by 32768, the rest by 32767.
#[inline]
pub fn to_pcm16(sample: f32) -> i16 {
    let s = sample.clamp(-1.0, 1.0);
    let scaled = if s < 0.0 { s * 32768.0 } else { s * 32767.0 };
    scaled.round() as i16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scaling_is_asymmetric() {
        assert_eq!(to_pcm16(1.0), 32767);
        assert_eq!(to_pcm16(-1.0), -32768);
        assert_eq!(to_pcm16(0.0), 0);
        assert_eq!(to_pcm16(2.5), 32767);
        assert_eq!(to_pcm16(-7.0), -32768);
        assert_eq!(to_pcm16(f32::NAN), 0);
    }

    #[test]
    fn header_layout() {
        let bytes = encode(&[0.0, 0.0, 0.5, -0.5], 44_100).unwrap();
        assert_eq!(bytes.len(), HEADER_LEN + 8);

        let u32_at =
            |i: usize| u32::from_le_bytes([bytes[i], bytes[i + 1], bytes[i + 2], bytes[i + 3]]);
        let u16_at = |i: usize| u16::from_le_bytes([bytes[i], bytes[i + 1]]);

        assert_eq!(&bytes[0..4], b"RIFF");
        assert_eq!(u32_at(4), 36 + 8);
        assert_eq!(&bytes[8..12], b"WAVE");
        assert_eq!(&bytes[12..16], b"fmt ");
        assert_eq!(u32_at(16), 16);
        assert_eq!(u16_at(20), 1);
        assert_eq!(u16_at(22), 2);
        assert_eq!(u32_at(24), 44_100);
        assert_eq!(u32_at(28), 44_100 * 4);
        assert_eq!(u16_at(32), 4);
        assert_eq!(u16_at(34), 16);
        assert_eq!(&bytes[36..40], b"data");
        assert_eq!(u32_at(40), 8);
        assert_eq!(i16::from_le_bytes([bytes[48], bytes[49]]), 16_384);
        assert_eq!(i16::from_le_bytes([bytes[50], bytes[51]]), -16_384);
    }

    #[test]
    fn empty_take_is_a_valid_file() {
        let bytes = empty(48_000).unwrap();
        assert_eq!(bytes.len(), HEADER_LEN);

        let reader = hound::WavReader::new(Cursor::new(bytes)).unwrap();
        assert_eq!(reader.spec().sample_rate, 48_000);
        assert_eq!(reader.len(), 0);
    }
}
