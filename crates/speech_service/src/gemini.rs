//! HTTP client for Gemini's `generateContent` endpoint with audio output.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::catalog::voice_or_default;
use crate::prompt::build_prompt;
use crate::request::GenerationSettings;
use crate::service::{ServiceError, SpeechService, TransportAudio};

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// e.g. `https://generativelanguage.googleapis.com/v1beta`, no trailing slash.
    pub base_url: String,
    pub model: String,
    pub api_key: Option<String>,
    /// Name of the variable the key was expected in, for error messages.
    pub api_key_env: String,
    pub timeout: Duration,
    /// Used when the response does not state its rate.
    pub sample_rate: u32,
}

pub struct GeminiSpeechService {
    config: GeminiConfig,
    client: reqwest::Client,
}

impl GeminiSpeechService {
    pub fn new(config: GeminiConfig) -> Result<Self, ServiceError> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(config.timeout)
            .build()?;
        Ok(Self { config, client })
    }

    pub fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig<'a>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<TextPart<'a>>,
}

#[derive(Debug, Serialize)]
struct TextPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_modalities: [&'static str; 1],
    speech_config: SpeechConfig<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SpeechConfig<'a> {
    voice_config: VoiceConfig<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VoiceConfig<'a> {
    prebuilt_voice_config: PrebuiltVoiceConfig<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PrebuiltVoiceConfig<'a> {
    voice_name: &'a str,
}

#[derive(Debug, Default, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Default, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponsePart {
    #[serde(default)]
    inline_data: Option<InlineData>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    #[serde(default)]
    mime_type: Option<String>,
    #[serde(default)]
    data: String,
}

/// Pull `rate=N` out of a mime type such as `audio/L16;codec=pcm;rate=24000`.
fn rate_from_mime(mime: &str) -> Option<u32> {
    mime.split(';')
        .filter_map(|param| param.trim().split_once('='))
        .find(|(key, _)| key.trim().eq_ignore_ascii_case("rate"))
        .and_then(|(_, value)| value.trim().parse().ok())
        .filter(|rate| *rate > 0)
}

/// First non-empty inline audio part of the first candidate.
fn extract_audio(body: &str, default_rate: u32) -> Result<TransportAudio, ServiceError> {
    let response: GenerateResponse = serde_json::from_str(body)?;
    let inline = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|p| p.inline_data)
                .find(|d| !d.data.is_empty())
        })
        .ok_or(ServiceError::EmptyAudio)?;

    let sample_rate = inline
        .mime_type
        .as_deref()
        .and_then(rate_from_mime)
        .unwrap_or(default_rate);
    Ok(TransportAudio {
        payload: inline.data,
        sample_rate,
    })
}

#[async_trait]
impl SpeechService for GeminiSpeechService {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn synthesize(&self, settings: &GenerationSettings) -> Result<TransportAudio, ServiceError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| ServiceError::MissingCredential {
                env_var: self.config.api_key_env.clone(),
            })?;

        let voice = voice_or_default(&settings.voice_id);
        let prompt = build_prompt(settings, voice);
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![TextPart { text: &prompt }],
            }],
            generation_config: GenerationConfig {
                response_modalities: ["AUDIO"],
                speech_config: SpeechConfig {
                    voice_config: VoiceConfig {
                        prebuilt_voice_config: PrebuiltVoiceConfig {
                            voice_name: voice.prebuilt_voice,
                        },
                    },
                },
            },
        };

        log::info!(
            "gemini: requesting {} words with voice {} ({}) from {}",
            settings.word_count(),
            voice.name,
            voice.prebuilt_voice,
            self.config.model
        );

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            log::warn!("gemini: request failed with {}", status);
            return Err(ServiceError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let audio = extract_audio(&body, self.config.sample_rate)?;
        log::debug!(
            "gemini: received {} payload chars at {} Hz",
            audio.payload.len(),
            audio.sample_rate
        );
        Ok(audio)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_from_mime() {
        assert_eq!(rate_from_mime("audio/L16;codec=pcm;rate=24000"), Some(24000));
        assert_eq!(rate_from_mime("audio/L16; rate=16000"), Some(16000));
        assert_eq!(rate_from_mime("audio/L16"), None);
        assert_eq!(rate_from_mime("audio/L16;rate=0"), None);
        assert_eq!(rate_from_mime("audio/L16;rate=abc"), None);
    }

    #[test]
    fn test_extract_audio() {
        let body = r#"{"candidates":[{"content":{"parts":[
            {"text":"ignored"},
            {"inlineData":{"mimeType":"audio/L16;codec=pcm;rate=24000","data":"AAD/fwCA"}}
        ]}}]}"#;
        let audio = extract_audio(body, 8000).unwrap();
        assert_eq!(audio.payload, "AAD/fwCA");
        assert_eq!(audio.sample_rate, 24000);
    }

    #[test]
    fn test_extract_audio_default_rate() {
        let body = r#"{"candidates":[{"content":{"parts":[{"inlineData":{"data":"AAAA"}}]}}]}"#;
        assert_eq!(extract_audio(body, 24000).unwrap().sample_rate, 24000);
    }

    #[test]
    fn test_extract_audio_empty() {
        assert!(matches!(
            extract_audio(r#"{"candidates":[]}"#, 24000),
            Err(ServiceError::EmptyAudio)
        ));
        assert!(matches!(
            extract_audio(r#"{}"#, 24000),
            Err(ServiceError::EmptyAudio)
        ));
        assert!(matches!(
            extract_audio(
                r#"{"candidates":[{"content":{"parts":[{"inlineData":{"data":""}}]}}]}"#,
                24000
            ),
            Err(ServiceError::EmptyAudio)
        ));
        assert!(matches!(
            extract_audio("<html>", 24000),
            Err(ServiceError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_request_shape() {
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![TextPart { text: "hola" }],
            }],
            generation_config: GenerationConfig {
                response_modalities: ["AUDIO"],
                speech_config: SpeechConfig {
                    voice_config: VoiceConfig {
                        prebuilt_voice_config: PrebuiltVoiceConfig { voice_name: "Kore" },
                    },
                },
            },
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hola");
        assert_eq!(json["generationConfig"]["responseModalities"][0], "AUDIO");
        assert_eq!(
            json["generationConfig"]["speechConfig"]["voiceConfig"]["prebuiltVoiceConfig"]
                ["voiceName"],
            "Kore"
        );
    }
}
