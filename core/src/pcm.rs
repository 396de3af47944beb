//! 16-bit PCM <-> float sample conversion.
//!
//! Decoding divides by 32768 so the integer range maps onto [-1.0, 1.0).
//! Encoding uses an asymmetric scale (32768 below zero, 32767 at or above
//! zero) so that both -1.0 and 1.0 land on representable integers.
//!
//! Rounding policy: the scaled value is rounded toward positive infinity
//! (`ceil`) in f64. Under that policy every integer sample survives a
//! decode/encode round trip unchanged, including 32767, and the quantization
//! error of encode-then-decode stays within 1/32768.

/// Full-scale magnitude of a 16-bit sample. Divisor when normalizing, and
/// multiplier for negative floats when quantizing.
pub const PCM16_FULL_SCALE: f64 = 32768.0;
/// Multiplier used for non-negative floats when quantizing.
pub const PCM16_POSITIVE_SCALE: f64 = 32767.0;

/// Bytes per 16-bit sample.
pub const BYTES_PER_SAMPLE: usize = 2;

/// Normalize a signed 16-bit sample to a float in [-1.0, 1.0).
#[inline]
pub fn pcm16_to_f32(sample: i16) -> f32 {
    sample as f32 / PCM16_FULL_SCALE as f32
}

/// Quantize a float sample to signed 16-bit.
///
/// Out-of-range values are clamped to [-1.0, 1.0] first. The caller must
/// reject non-finite input; NaN would otherwise collapse to 0.
#[inline]
pub fn f32_to_pcm16(sample: f32) -> i16 {
    let s = f64::from(sample).clamp(-1.0, 1.0);
    let scaled = if s < 0.0 {
        s * PCM16_FULL_SCALE
    } else {
        s * PCM16_POSITIVE_SCALE
    };
    // Always within [-32768, 32767] after the clamp.
    scaled.ceil() as i16
}
