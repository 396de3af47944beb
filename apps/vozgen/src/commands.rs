use anyhow::Context;
use session_history::{export_item, HistoryItem, SessionHistory};
use speech_service::request::ui_scale_from_speed;
use speech_service::{
    catalog::TAGS, generate_clip, Accent, GeminiConfig, GeminiSpeechService, GenerationSettings,
    SpeechService, Style, VOICES,
};
use std::path::{Path, PathBuf};
use std::time::Duration;
use vozgen_config::{resolve_api_key, VozgenSettings};
use vozgen_core::{synthesize_to_container, ContainerBlob, ContainerHeader};

use crate::input::{build_settings, load_texts, VoiceChoices};

pub(crate) struct GenerateArgs {
    pub texts: Vec<String>,
    pub files: Vec<PathBuf>,
    pub choices: VoiceChoices,
    pub out: Option<PathBuf>,
}

pub(crate) async fn generate(settings: &VozgenSettings, args: GenerateArgs) -> anyhow::Result<()> {
    let texts = load_texts(args.texts, &args.files)?;
    if args.out.is_some() && texts.len() > 1 {
        anyhow::bail!("--out takes a single text; got {}", texts.len());
    }
    let requests = texts
        .into_iter()
        .map(|text| build_settings(text, &args.choices, &settings.defaults))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let service = GeminiSpeechService::new(GeminiConfig {
        base_url: settings.service.base_url.clone(),
        model: settings.service.model.clone(),
        api_key: resolve_api_key(&settings.service),
        api_key_env: settings.service.api_key_env.clone(),
        timeout: Duration::from_secs(settings.service.timeout_secs),
        sample_rate: settings.service.sample_rate,
    })?;

    let mut history = SessionHistory::with_capacity(settings.output.history_limit);
    generate_all(&service, &requests, &mut history).await?;

    let paths = match args.out {
        Some(out) => {
            let item = history
                .latest()
                .context("generated clip missing from history")?;
            write_clip(&item.clip, &out)?;
            vec![out]
        }
        None => save_history(&history, &settings.output.dir)?,
    };

    for item in history.iter() {
        log::info!(
            "vozgen: {}",
            serde_json::to_string(&item.summary()).unwrap_or_else(|_| item.id.clone())
        );
    }
    for path in &paths {
        println!("{}", path.display());
    }
    Ok(())
}

/// Generate every request in order into `history`. Once the history is
/// full, each new clip evicts the oldest one.
pub(crate) async fn generate_all<S>(
    service: &S,
    requests: &[GenerationSettings],
    history: &mut SessionHistory,
) -> anyhow::Result<()>
where
    S: SpeechService + ?Sized,
{
    let total = requests.len();
    for (index, request) in requests.iter().enumerate() {
        log::info!(
            "vozgen: clip {}/{} voice {} speed {} (step {}) pitch {}",
            index + 1,
            total,
            request.voice_id,
            request.speed,
            ui_scale_from_speed(request.speed),
            request.pitch
        );
        let clip = generate_clip(service, request)
            .await
            .with_context(|| format!("Generation {} of {} failed", index + 1, total))?;
        if let Some(evicted) = history.push(HistoryItem::new(request, clip)) {
            log::warn!(
                "vozgen: history limit reached, dropped clip {} ({})",
                evicted.id,
                evicted.text_snippet
            );
        }
    }
    Ok(())
}

/// Save every clip still held in `history`, newest first.
pub(crate) fn save_history(history: &SessionHistory, dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    history
        .iter()
        .map(|item| export_item(item, dir).map_err(anyhow::Error::from))
        .collect()
}

/// Offline path: a file holding the base-64 payload becomes a WAV file.
pub(crate) fn encode(payload: &Path, sample_rate: u32, out: &Path) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(payload)
        .with_context(|| format!("Failed to read payload {}", payload.display()))?;
    // Only the surrounding whitespace of the file is dropped.
    let blob = synthesize_to_container(text.trim(), sample_rate)
        .with_context(|| format!("Failed to convert payload {}", payload.display()))?;
    write_clip(&blob, out)?;
    log::info!(
        "vozgen: wrote {} ({} samples, {:.2}s)",
        out.display(),
        blob.sample_count(),
        blob.duration_secs()
    );
    println!("{}", out.display());
    Ok(())
}

pub(crate) fn inspect(path: &Path) -> anyhow::Result<()> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let header = ContainerHeader::parse(&bytes)
        .with_context(|| format!("{} is not a canonical PCM16 WAV", path.display()))?;

    println!("file:            {}", path.display());
    println!("riff size:       {}", header.riff_size);
    println!("format:          {}", header.format);
    println!("channels:        {}", header.channels);
    println!("sample rate:     {} Hz", header.sample_rate);
    println!("byte rate:       {}", header.byte_rate);
    println!("block align:     {}", header.block_align);
    println!("bits per sample: {}", header.bits_per_sample);
    println!("data length:     {}", header.data_len);
    println!("samples:         {}", header.sample_count());
    println!("duration:        {:.3}s", header.duration_secs());
    Ok(())
}

pub(crate) fn voices() {
    println!("Voices:");
    for voice in VOICES.iter() {
        println!(
            "  {:<3} {:<10} {:<7} {:<7} {}",
            voice.id,
            voice.name,
            voice.gender.label(),
            voice.prebuilt_voice,
            voice.base_tone
        );
    }
    let accents: Vec<String> = Accent::ALL.iter().map(|a| format!("{a:?} ({a})")).collect();
    println!("Accents: {}", accents.join(", "));
    let styles: Vec<String> = Style::ALL.iter().map(|s| format!("{s:?} ({s})")).collect();
    println!("Styles:  {}", styles.join(", "));
    println!("Tags:    {}", TAGS.join(" "));
}

fn write_clip(clip: &ContainerBlob, out: &Path) -> anyhow::Result<()> {
    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(out, clip.as_bytes())
        .with_context(|| format!("Failed to write {}", out.display()))
}
