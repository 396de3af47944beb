//! Canonical 44-byte-header WAV (RIFF/WAVE, linear PCM) container.
//!
//! Layout, all integers little-endian:
//!
//! | offset | size | field                         |
//! |--------|------|-------------------------------|
//! | 0      | 4    | `RIFF`                        |
//! | 4      | 4    | 36 + data length              |
//! | 8      | 4    | `WAVE`                        |
//! | 12     | 4    | `fmt `                        |
//! | 16     | 4    | 16 (fmt chunk size)           |
//! | 20     | 2    | 1 (linear PCM)                |
//! | 22     | 2    | channel count                 |
//! | 24     | 4    | sample rate                   |
//! | 28     | 4    | byte rate                     |
//! | 32     | 2    | block align                   |
//! | 34     | 2    | bits per sample               |
//! | 36     | 4    | `data`                        |
//! | 40     | 4    | data length                   |
//! | 44     | n    | samples                       |

use thiserror::Error;

use crate::pcm::{f32_to_pcm16, BYTES_PER_SAMPLE};

pub const HEADER_LEN: usize = 44;
/// RIFF chunk size = this + data length.
pub const RIFF_SIZE_BASE: u32 = 36;
pub const FMT_CHUNK_SIZE: u32 = 16;
pub const FORMAT_PCM: u16 = 1;
pub const WAV_MIME_TYPE: &str = "audio/wav";

const SUPPORTED_CHANNELS: u16 = 1;
const SUPPORTED_BIT_DEPTH: u16 = 16;

/// How a sample buffer is interpreted when encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioDescriptor {
    sample_rate: u32,
    channel_count: u16,
    bit_depth: u16,
}

impl AudioDescriptor {
    /// Build a descriptor. Validity is checked by [`encode`], not here.
    pub fn new(sample_rate: u32, channel_count: u16, bit_depth: u16) -> Self {
        Self {
            sample_rate,
            channel_count,
            bit_depth,
        }
    }

    /// Mono, 16-bit.
    pub fn mono16(sample_rate: u32) -> Self {
        Self::new(sample_rate, SUPPORTED_CHANNELS, SUPPORTED_BIT_DEPTH)
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn channel_count(&self) -> u16 {
        self.channel_count
    }

    pub fn bit_depth(&self) -> u16 {
        self.bit_depth
    }

    pub fn block_align(&self) -> u16 {
        self.channel_count.saturating_mul(self.bit_depth / 8)
    }

    /// `None` when the byte rate does not fit the 32-bit header field.
    pub fn byte_rate(&self) -> Option<u32> {
        self.sample_rate.checked_mul(u32::from(self.block_align()))
    }

    fn validate(&self) -> Result<u32, EncodeError> {
        if self.channel_count != SUPPORTED_CHANNELS {
            return Err(EncodeError::UnsupportedChannelCount(self.channel_count));
        }
        if self.bit_depth != SUPPORTED_BIT_DEPTH {
            return Err(EncodeError::UnsupportedBitDepth(self.bit_depth));
        }
        if self.sample_rate == 0 {
            return Err(EncodeError::InvalidSampleRate(self.sample_rate));
        }
        self.byte_rate().ok_or(EncodeError::ByteRateOverflow {
            sample_rate: self.sample_rate,
        })
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EncodeError {
    #[error("unsupported channel count {0} (only mono is supported)")]
    UnsupportedChannelCount(u16),

    #[error("unsupported bit depth {0} (only 16-bit is supported)")]
    UnsupportedBitDepth(u16),

    #[error("invalid sample rate {0}")]
    InvalidSampleRate(u32),

    #[error("byte rate for sample rate {sample_rate} does not fit a 32-bit header field")]
    ByteRateOverflow { sample_rate: u32 },

    #[error("non-finite sample {value} at index {index}")]
    NonFiniteSample { index: usize, value: f32 },

    #[error("{samples} samples exceed the 32-bit container size limit")]
    DataTooLarge { samples: usize },
}

/// A complete, playable container. Owned outright by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerBlob {
    bytes: Vec<u8>,
    sample_rate: u32,
    sample_count: usize,
}

impl ContainerBlob {
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// A blob always carries at least its header, so this is never true.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn mime_type(&self) -> &'static str {
        WAV_MIME_TYPE
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn sample_count(&self) -> usize {
        self.sample_count
    }

    /// The data section, without the header.
    pub fn data(&self) -> &[u8] {
        &self.bytes[HEADER_LEN..]
    }

    pub fn duration_secs(&self) -> f64 {
        self.sample_count as f64 / f64::from(self.sample_rate)
    }
}

impl AsRef<[u8]> for ContainerBlob {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

/// Encode float samples into a WAV container.
///
/// Either returns a complete blob or an error; all checks run before the
/// output buffer is built.
pub fn encode(samples: &[f32], descriptor: &AudioDescriptor) -> Result<ContainerBlob, EncodeError> {
    let byte_rate = descriptor.validate()?;

    if let Some((index, &value)) = samples.iter().enumerate().find(|(_, s)| !s.is_finite()) {
        return Err(EncodeError::NonFiniteSample { index, value });
    }

    let data_len = samples
        .len()
        .checked_mul(BYTES_PER_SAMPLE)
        .and_then(|n| u32::try_from(n).ok())
        .filter(|n| n.checked_add(RIFF_SIZE_BASE).is_some())
        .ok_or(EncodeError::DataTooLarge {
            samples: samples.len(),
        })?;

    let mut bytes = Vec::with_capacity(HEADER_LEN + data_len as usize);
    bytes.extend_from_slice(b"RIFF");
    bytes.extend_from_slice(&(RIFF_SIZE_BASE + data_len).to_le_bytes());
    bytes.extend_from_slice(b"WAVE");

    bytes.extend_from_slice(b"fmt ");
    bytes.extend_from_slice(&FMT_CHUNK_SIZE.to_le_bytes());
    bytes.extend_from_slice(&FORMAT_PCM.to_le_bytes());
    bytes.extend_from_slice(&descriptor.channel_count().to_le_bytes());
    bytes.extend_from_slice(&descriptor.sample_rate().to_le_bytes());
    bytes.extend_from_slice(&byte_rate.to_le_bytes());
    bytes.extend_from_slice(&descriptor.block_align().to_le_bytes());
    bytes.extend_from_slice(&descriptor.bit_depth().to_le_bytes());

    bytes.extend_from_slice(b"data");
    bytes.extend_from_slice(&data_len.to_le_bytes());
    debug_assert_eq!(bytes.len(), HEADER_LEN);

    for &sample in samples {
        bytes.extend_from_slice(&f32_to_pcm16(sample).to_le_bytes());
    }

    log::debug!(
        "container: encoded {} samples at {} Hz ({} bytes)",
        samples.len(),
        descriptor.sample_rate(),
        bytes.len()
    );

    Ok(ContainerBlob {
        bytes,
        sample_rate: descriptor.sample_rate(),
        sample_count: samples.len(),
    })
}

/// Parsed view of a canonical 44-byte header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerHeader {
    pub riff_size: u32,
    pub format: u16,
    pub channels: u16,
    pub sample_rate: u32,
    pub byte_rate: u32,
    pub block_align: u16,
    pub bits_per_sample: u16,
    pub data_len: u32,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HeaderError {
    #[error("container is {0} bytes, shorter than the 44-byte header")]
    Truncated(usize),

    #[error("expected tag {expected:?} at offset {offset}")]
    BadTag {
        offset: usize,
        expected: &'static str,
    },

    #[error("unexpected fmt chunk size {0}")]
    FmtChunkSize(u32),

    #[error("RIFF size {riff_size} inconsistent with data length {data_len}")]
    RiffSizeMismatch { riff_size: u32, data_len: u32 },

    #[error("data length {declared} does not match {actual} bytes after the header")]
    DataLengthMismatch { declared: u32, actual: usize },
}

fn read_u16(bytes: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([bytes[offset], bytes[offset + 1]])
}

fn read_u32(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}

fn expect_tag(bytes: &[u8], offset: usize, expected: &'static str) -> Result<(), HeaderError> {
    if &bytes[offset..offset + 4] == expected.as_bytes() {
        Ok(())
    } else {
        Err(HeaderError::BadTag { offset, expected })
    }
}

impl ContainerHeader {
    /// Read back the header of a canonical container and check that its
    /// length fields agree with the buffer.
    pub fn parse(bytes: &[u8]) -> Result<Self, HeaderError> {
        if bytes.len() < HEADER_LEN {
            return Err(HeaderError::Truncated(bytes.len()));
        }
        expect_tag(bytes, 0, "RIFF")?;
        expect_tag(bytes, 8, "WAVE")?;
        expect_tag(bytes, 12, "fmt ")?;
        expect_tag(bytes, 36, "data")?;

        let fmt_size = read_u32(bytes, 16);
        if fmt_size != FMT_CHUNK_SIZE {
            return Err(HeaderError::FmtChunkSize(fmt_size));
        }

        let header = Self {
            riff_size: read_u32(bytes, 4),
            format: read_u16(bytes, 20),
            channels: read_u16(bytes, 22),
            sample_rate: read_u32(bytes, 24),
            byte_rate: read_u32(bytes, 28),
            block_align: read_u16(bytes, 32),
            bits_per_sample: read_u16(bytes, 34),
            data_len: read_u32(bytes, 40),
        };

        if header.riff_size.checked_sub(RIFF_SIZE_BASE) != Some(header.data_len) {
            return Err(HeaderError::RiffSizeMismatch {
                riff_size: header.riff_size,
                data_len: header.data_len,
            });
        }
        let actual = bytes.len() - HEADER_LEN;
        if header.data_len as usize != actual {
            return Err(HeaderError::DataLengthMismatch {
                declared: header.data_len,
                actual,
            });
        }
        Ok(header)
    }

    pub fn sample_count(&self) -> usize {
        match self.block_align {
            0 => 0,
            align => self.data_len as usize / align as usize,
        }
    }

    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.sample_count() as f64 / f64::from(self.sample_rate)
    }
}
