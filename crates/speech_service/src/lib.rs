//! Speech Service - boundary to the remote generative speech model
//!
//! Builds the prompt from the user's voice/accent/style/speed/pitch choices,
//! calls the model, and hands the returned base-64 PCM to `vozgen_core`.

pub mod catalog;
mod gemini;
mod generate;
pub mod prompt;
pub mod request;
mod service;

pub use catalog::{find_voice, voice_or_default, Accent, Gender, Style, VoiceOption, VOICES};
pub use gemini::{GeminiConfig, GeminiSpeechService};
pub use generate::{generate_clip, GenerateError};
pub use request::{GenerationSettings, RequestError, MAX_WORDS};
pub use service::{ServiceError, SpeechService, TransportAudio};
