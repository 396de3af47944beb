use thiserror::Error;
use vozgen_core::{synthesize_to_container, ContainerBlob, SynthesisError};

use crate::request::{GenerationSettings, RequestError};
use crate::service::{ServiceError, SpeechService};

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("invalid request: {0}")]
    Request(#[from] RequestError),

    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error(transparent)]
    Synthesis(#[from] SynthesisError),
}

/// Validate, call the speech service, and package its audio as WAV.
///
/// Nothing is produced unless every step succeeds.
pub async fn generate_clip<S>(
    service: &S,
    settings: &GenerationSettings,
) -> Result<ContainerBlob, GenerateError>
where
    S: SpeechService + ?Sized,
{
    settings.validate()?;
    let audio = service.synthesize(settings).await?;
    let blob = synthesize_to_container(&audio.payload, audio.sample_rate)?;
    log::info!(
        "{}: generated {:.2}s clip ({} bytes)",
        service.name(),
        blob.duration_secs(),
        blob.len()
    );
    Ok(blob)
}
