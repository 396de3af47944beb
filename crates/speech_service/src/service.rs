use async_trait::async_trait;
use thiserror::Error;

use crate::request::GenerationSettings;

/// Audio as handed back by the speech model: base-64 PCM16 plus its rate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportAudio {
    pub payload: String,
    pub sample_rate: u32,
}

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("API key not found (set {env_var})")]
    MissingCredential { env_var: String },

    #[error("network error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("speech service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed service response: {0}")]
    MalformedResponse(#[from] serde_json::Error),

    #[error("no audio content generated")]
    EmptyAudio,
}

/// Remote text-to-speech backend.
///
/// One outstanding request per generation; callers do not coordinate
/// overlapping requests.
#[async_trait]
pub trait SpeechService: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    /// Generate speech for already-validated settings.
    async fn synthesize(&self, settings: &GenerationSettings) -> Result<TransportAudio, ServiceError>;
}
