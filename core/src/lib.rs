//! VozGen core: transport decoding and WAV container encoding for
//! synthesized speech.
//!
//! ```
//! use vozgen_core::{synthesize_to_container, DEFAULT_SAMPLE_RATE};
//!
//! // Three samples: 0, 32767, -32768
//! let blob = synthesize_to_container("AAD/fwCA", DEFAULT_SAMPLE_RATE).unwrap();
//! assert_eq!(blob.len(), 50);
//! assert_eq!(blob.data(), &[0x00, 0x00, 0xFF, 0x7F, 0x00, 0x80]);
//! ```

pub mod container;
pub mod pcm;
pub mod pipeline;
pub mod transport;

pub use container::{
    encode, AudioDescriptor, ContainerBlob, ContainerHeader, EncodeError, HeaderError, HEADER_LEN,
    WAV_MIME_TYPE,
};
pub use pcm::{f32_to_pcm16, pcm16_to_f32};
pub use pipeline::{synthesize_to_container, SynthesisError, DEFAULT_SAMPLE_RATE};
pub use transport::{decode, decode_to_bytes, DecodeError};
