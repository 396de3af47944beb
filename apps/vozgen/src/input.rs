use anyhow::Context;
use speech_service::catalog::{find_tag, insert_tag};
use speech_service::request::speed_from_ui_scale;
use speech_service::{find_voice, Accent, GenerationSettings, Style, VOICES};
use std::path::{Path, PathBuf};
use vozgen_config::VoiceDefaults;

/// Command-line choices; `None` means "use the configured default".
#[derive(Debug, Default, Clone)]
pub(crate) struct VoiceChoices {
    pub voice: Option<String>,
    pub accent: Option<Accent>,
    pub style: Option<Style>,
    pub speed: Option<f32>,
    /// Slider position, -10..=10. Ignored when `speed` is set.
    pub speed_step: Option<i8>,
    pub pitch: Option<i8>,
    /// Tag names appended to every text, e.g. `risa`.
    pub tags: Vec<String>,
}

/// All `--text` values first, then the contents of each `--file`.
pub(crate) fn load_texts(texts: Vec<String>, files: &[PathBuf]) -> anyhow::Result<Vec<String>> {
    let mut out = texts;
    for path in files {
        out.push(read_text_file(path)?);
    }
    if out.is_empty() {
        anyhow::bail!("No text given (use --text or --file)");
    }
    Ok(out)
}

pub(crate) fn read_text_file(path: &Path) -> anyhow::Result<String> {
    let is_txt = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("txt"));
    if !is_txt {
        anyhow::bail!(
            "Unsupported file {}: only .txt files can be loaded",
            path.display()
        );
    }
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read text file {}", path.display()))
}

/// Merge command-line choices over the configured defaults and validate.
pub(crate) fn build_settings(
    mut text: String,
    choices: &VoiceChoices,
    defaults: &VoiceDefaults,
) -> anyhow::Result<GenerationSettings> {
    for name in &choices.tags {
        let tag = find_tag(name).with_context(|| format!("Unknown tag '{name}'"))?;
        insert_tag(&mut text, tag);
    }
    let voice_id = choices
        .voice
        .clone()
        .unwrap_or_else(|| defaults.voice_id.clone());
    if find_voice(&voice_id).is_none() {
        let known: Vec<&str> = VOICES.iter().map(|v| v.id).collect();
        anyhow::bail!("Unknown voice '{}' (known: {})", voice_id, known.join(", "));
    }
    let accent = match choices.accent {
        Some(accent) => accent,
        None => defaults
            .accent
            .parse()
            .context("Invalid defaults.accent in config")?,
    };
    let style = match choices.style {
        Some(style) => style,
        None => defaults
            .style
            .parse()
            .context("Invalid defaults.style in config")?,
    };

    let settings = GenerationSettings {
        text,
        voice_id,
        accent,
        style,
        speed: choices
            .speed
            .or(choices.speed_step.map(speed_from_ui_scale))
            .unwrap_or(defaults.speed),
        pitch: choices.pitch.unwrap_or(defaults.pitch),
    };
    settings.validate()?;
    Ok(settings)
}
