use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use speech_service::{Accent, GenerationSettings, Style};
use vozgen_core::ContainerBlob;

/// Characters of the source text kept for display.
pub const SNIPPET_CHARS: usize = 100;

/// Generation settings as recorded in history. The text itself is not kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClipSettings {
    pub voice_id: String,
    pub accent: Accent,
    pub style: Style,
    pub speed: f32,
    pub pitch: i8,
}

impl From<&GenerationSettings> for ClipSettings {
    fn from(settings: &GenerationSettings) -> Self {
        Self {
            voice_id: settings.voice_id.clone(),
            accent: settings.accent,
            style: settings.style,
            speed: settings.speed,
            pitch: settings.pitch,
        }
    }
}

/// One generated clip.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryItem {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub text_snippet: String,
    pub settings: ClipSettings,
    pub clip: ContainerBlob,
}

impl HistoryItem {
    pub fn new(settings: &GenerationSettings, clip: ContainerBlob) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            created_at: Utc::now(),
            text_snippet: snippet(&settings.text),
            settings: ClipSettings::from(settings),
            clip,
        }
    }

    /// Name the clip is saved under.
    pub fn file_name(&self) -> String {
        format!("voice-gen-{}.wav", self.id)
    }

    pub fn summary(&self) -> HistorySummary {
        HistorySummary {
            id: self.id.clone(),
            created_at: self.created_at.to_rfc3339(),
            text_snippet: self.text_snippet.clone(),
            settings: self.settings.clone(),
            duration_secs: self.clip.duration_secs(),
            size_bytes: self.clip.len(),
        }
    }
}

/// Listing row for a history item, without the audio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistorySummary {
    pub id: String,
    pub created_at: String,
    pub text_snippet: String,
    pub settings: ClipSettings,
    pub duration_secs: f64,
    pub size_bytes: usize,
}

/// First [`SNIPPET_CHARS`] characters, with `...` appended when cut.
pub fn snippet(text: &str) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(SNIPPET_CHARS).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}
