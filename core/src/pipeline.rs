use thiserror::Error;

use crate::container::{encode, AudioDescriptor, ContainerBlob, EncodeError};
use crate::transport::{decode, DecodeError};

/// Fixed output rate of the upstream speech model.
pub const DEFAULT_SAMPLE_RATE: u32 = 24_000;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SynthesisError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// Turn a transport payload from the speech service into a playable mono
/// 16-bit WAV container.
pub fn synthesize_to_container(
    payload: &str,
    sample_rate: u32,
) -> Result<ContainerBlob, SynthesisError> {
    let samples = decode(payload)?;
    let blob = encode(&samples, &AudioDescriptor::mono16(sample_rate))?;
    log::debug!(
        "pipeline: {} samples -> {:.2}s container",
        blob.sample_count(),
        blob.duration_secs()
    );
    Ok(blob)
}
