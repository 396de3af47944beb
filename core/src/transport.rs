//! Transport decoding: base-64 payload -> normalized float samples.
//!
//! The upstream speech service returns headerless mono PCM16 (little-endian)
//! wrapped in standard base-64 with padding.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use thiserror::Error;

use crate::pcm::{pcm16_to_f32, BYTES_PER_SAMPLE};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("unusable payload from service: invalid base64 ({0})")]
    InvalidBase64(#[from] base64::DecodeError),

    #[error("unusable payload from service: {len} bytes cannot form whole 16-bit samples")]
    OddByteCount { len: usize },
}

/// Decode the transport string to raw PCM bytes.
///
/// Fails if the payload is not valid padded base-64 or if the decoded length
/// is odd. A trailing byte is never silently dropped.
pub fn decode_to_bytes(payload: &str) -> Result<Vec<u8>, DecodeError> {
    let bytes = STANDARD.decode(payload)?;
    if bytes.len() % BYTES_PER_SAMPLE != 0 {
        return Err(DecodeError::OddByteCount { len: bytes.len() });
    }
    Ok(bytes)
}

/// Decode a transport payload into samples in [-1.0, 1.0), preserving order.
pub fn decode(payload: &str) -> Result<Vec<f32>, DecodeError> {
    let bytes = decode_to_bytes(payload)?;
    let samples: Vec<f32> = bytes
        .chunks_exact(BYTES_PER_SAMPLE)
        .map(|pair| pcm16_to_f32(i16::from_le_bytes([pair[0], pair[1]])))
        .collect();
    log::debug!(
        "transport: decoded {} bytes into {} samples",
        bytes.len(),
        samples.len()
    );
    Ok(samples)
}
