use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-preview-tts";
pub const DEFAULT_API_KEY_ENV: &str = "GEMINI_API_KEY";
/// Checked when the configured variable is unset.
pub const FALLBACK_API_KEY_ENV: &str = "API_KEY";

#[derive(Debug, Clone, PartialEq)]
pub struct ServiceSettings {
    pub base_url: String,
    pub model: String,
    pub api_key_env: String,
    pub timeout_secs: u64,
    pub sample_rate: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VoiceDefaults {
    pub voice_id: String,
    pub accent: String,
    pub style: String,
    pub speed: f32,
    pub pitch: i8,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutputSettings {
    pub dir: PathBuf,
    /// Clips held per `generate` run; 0 keeps every clip.
    pub history_limit: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VozgenSettings {
    pub service: ServiceSettings,
    pub defaults: VoiceDefaults,
    pub output: OutputSettings,
}

impl Default for VozgenSettings {
    fn default() -> Self {
        RootConfigToml::default().into()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct ServiceToml {
    #[serde(default = "default_base_url")]
    base_url: String,
    #[serde(default = "default_model")]
    model: String,
    #[serde(default = "default_api_key_env")]
    api_key_env: String,
    #[serde(default = "default_timeout_secs")]
    timeout_secs: u64,
    #[serde(default = "default_sample_rate")]
    sample_rate: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct DefaultsToml {
    #[serde(default = "default_voice_id")]
    voice_id: String,
    #[serde(default = "default_accent")]
    accent: String,
    #[serde(default = "default_style")]
    style: String,
    #[serde(default = "default_speed")]
    speed: f32,
    #[serde(default)]
    pitch: i8,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct OutputToml {
    #[serde(default = "default_output_dir")]
    dir: PathBuf,
    #[serde(default = "default_history_limit")]
    history_limit: usize,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_api_key_env() -> String {
    DEFAULT_API_KEY_ENV.to_string()
}

fn default_timeout_secs() -> u64 {
    120
}

fn default_sample_rate() -> u32 {
    24_000
}

fn default_voice_id() -> String {
    "f1".to_string()
}

fn default_accent() -> String {
    "peru".to_string()
}

fn default_style() -> String {
    "natural".to_string()
}

fn default_speed() -> f32 {
    1.0
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_history_limit() -> usize {
    50
}

impl Default for ServiceToml {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            api_key_env: default_api_key_env(),
            timeout_secs: default_timeout_secs(),
            sample_rate: default_sample_rate(),
        }
    }
}

impl Default for DefaultsToml {
    fn default() -> Self {
        Self {
            voice_id: default_voice_id(),
            accent: default_accent(),
            style: default_style(),
            speed: default_speed(),
            pitch: 0,
        }
    }
}

impl Default for OutputToml {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            history_limit: default_history_limit(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RootConfigToml {
    #[serde(default)]
    service: ServiceToml,
    #[serde(default)]
    defaults: DefaultsToml,
    #[serde(default)]
    output: OutputToml,
}

impl From<RootConfigToml> for VozgenSettings {
    fn from(root: RootConfigToml) -> Self {
        let RootConfigToml {
            service,
            defaults,
            output,
        } = root;
        Self {
            service: ServiceSettings {
                base_url: service.base_url.trim_end_matches('/').to_string(),
                model: service.model,
                api_key_env: service.api_key_env,
                timeout_secs: service.timeout_secs,
                sample_rate: service.sample_rate,
            },
            defaults: VoiceDefaults {
                voice_id: defaults.voice_id,
                accent: defaults.accent,
                style: defaults.style,
                speed: defaults.speed,
                pitch: defaults.pitch,
            },
            output: OutputSettings {
                dir: output.dir,
                history_limit: output.history_limit,
            },
        }
    }
}

/// Relative locations probed when no explicit config path is given.
const CONFIG_PATHS: [&str; 2] = ["configs/vozgen.toml", "../../configs/vozgen.toml"];

/// Try the common relative paths for `configs/vozgen.toml`.
pub fn read_config_toml_text() -> Option<(PathBuf, String)> {
    CONFIG_PATHS.iter().find_map(|p| {
        fs::read_to_string(p)
            .ok()
            .map(|text| (PathBuf::from(p), text))
    })
}

pub fn parse_settings(text: &str) -> anyhow::Result<VozgenSettings> {
    let root: RootConfigToml = toml::from_str(text)
        .map_err(|e| anyhow::anyhow!("Failed to parse vozgen.toml: {e}"))?;
    let settings = VozgenSettings::from(root);
    validate_settings(&settings)?;
    Ok(settings)
}

pub fn validate_settings(settings: &VozgenSettings) -> anyhow::Result<()> {
    if settings.service.sample_rate == 0 {
        anyhow::bail!("service.sample_rate must be positive");
    }
    if settings.service.timeout_secs == 0 {
        anyhow::bail!("service.timeout_secs must be positive");
    }
    if settings.service.model.trim().is_empty() {
        anyhow::bail!("service.model must not be empty");
    }
    if !settings.defaults.speed.is_finite() {
        anyhow::bail!("defaults.speed must be a finite number");
    }
    Ok(())
}

/// Load settings from `path`, or from the default locations when `path` is
/// `None`. A missing default file yields the built-in defaults; a missing
/// explicit file is an error.
pub fn load_settings(path: Option<&Path>) -> anyhow::Result<VozgenSettings> {
    match path {
        Some(path) => {
            let text = fs::read_to_string(path).map_err(|e| {
                anyhow::anyhow!("Could not read config {}: {e}", path.display())
            })?;
            log::info!("config: loaded {}", path.display());
            parse_settings(&text)
        }
        None => match read_config_toml_text() {
            Some((path, text)) => {
                log::info!("config: loaded {}", path.display());
                parse_settings(&text)
            }
            None => {
                log::debug!("config: no vozgen.toml found in {:?}, using defaults", CONFIG_PATHS);
                Ok(VozgenSettings::default())
            }
        },
    }
}

/// Look up the API credential. Empty values count as missing.
pub fn resolve_api_key(service: &ServiceSettings) -> Option<String> {
    resolve_api_key_with(service, |name| std::env::var(name).ok())
}

pub fn resolve_api_key_with<F>(service: &ServiceSettings, lookup: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    [service.api_key_env.as_str(), FALLBACK_API_KEY_ENV]
        .into_iter()
        .filter_map(|name| lookup(name))
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
}
