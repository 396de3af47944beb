//! Voices, accents, styles and inline markup tags offered to the user.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Female,
    Male,
}

impl Gender {
    pub fn label(&self) -> &'static str {
        match self {
            Gender::Female => "Mujer",
            Gender::Male => "Hombre",
        }
    }
}

/// A user-facing voice mapped onto one of the model's prebuilt voices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoiceOption {
    pub id: &'static str,
    pub name: &'static str,
    pub gender: Gender,
    /// Prebuilt voice name understood by the upstream model.
    pub prebuilt_voice: &'static str,
    pub base_tone: &'static str,
}

/// Female voices first.
pub const VOICES: [VoiceOption; 10] = [
    VoiceOption {
        id: "f1",
        name: "Valentina",
        gender: Gender::Female,
        prebuilt_voice: "Kore",
        base_tone: "Voz femenina clara y versátil",
    },
    VoiceOption {
        id: "f2",
        name: "Camila",
        gender: Gender::Female,
        prebuilt_voice: "Zephyr",
        base_tone: "Voz femenina suave y tranquila",
    },
    VoiceOption {
        id: "f3",
        name: "Isabella",
        gender: Gender::Female,
        prebuilt_voice: "Kore",
        base_tone: "Voz femenina dinámica y alegre",
    },
    VoiceOption {
        id: "f4",
        name: "Sofía",
        gender: Gender::Female,
        prebuilt_voice: "Zephyr",
        base_tone: "Voz femenina profunda y profesional",
    },
    VoiceOption {
        id: "f5",
        name: "Mariana",
        gender: Gender::Female,
        prebuilt_voice: "Kore",
        base_tone: "Voz femenina dulce y amable",
    },
    VoiceOption {
        id: "m1",
        name: "Mateo",
        gender: Gender::Male,
        prebuilt_voice: "Puck",
        base_tone: "Voz masculina estándar y amigable",
    },
    VoiceOption {
        id: "m2",
        name: "Santiago",
        gender: Gender::Male,
        prebuilt_voice: "Fenrir",
        base_tone: "Voz profunda, seria y autoritaria",
    },
    VoiceOption {
        id: "m3",
        name: "Leonardo",
        gender: Gender::Male,
        prebuilt_voice: "Charon",
        base_tone: "Voz grave, madura y narrativa",
    },
    VoiceOption {
        id: "m4",
        name: "Diego",
        gender: Gender::Male,
        prebuilt_voice: "Puck",
        base_tone: "Voz joven, rápida y enérgica",
    },
    VoiceOption {
        id: "m5",
        name: "Gabriel",
        gender: Gender::Male,
        prebuilt_voice: "Fenrir",
        base_tone: "Voz suave, pausada y reflexiva",
    },
];

pub fn find_voice(id: &str) -> Option<&'static VoiceOption> {
    VOICES.iter().find(|v| v.id == id)
}

/// Unknown ids fall back to the first voice in the catalog.
pub fn voice_or_default(id: &str) -> &'static VoiceOption {
    find_voice(id).unwrap_or_else(|| {
        log::warn!("catalog: unknown voice '{}', using '{}'", id, VOICES[0].id);
        &VOICES[0]
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptionError {
    kind: &'static str,
    value: String,
}

impl fmt::Display for ParseOptionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {} '{}'", self.kind, self.value)
    }
}

impl std::error::Error for ParseOptionError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Accent {
    Spain,
    Mexico,
    Argentina,
    #[default]
    Peru,
    Colombia,
}

impl Accent {
    pub const ALL: [Accent; 5] = [
        Accent::Spain,
        Accent::Mexico,
        Accent::Argentina,
        Accent::Peru,
        Accent::Colombia,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Accent::Spain => "España",
            Accent::Mexico => "México",
            Accent::Argentina => "Argentina",
            Accent::Peru => "Perú",
            Accent::Colombia => "Colombia",
        }
    }

    /// Pronunciation guidance sent to the model.
    pub fn instruction(&self) -> &'static str {
        match self {
            Accent::Spain => {
                "Español de España (Castellano), pronunciación peninsular con distinción de s/z."
            }
            Accent::Mexico => "Español de México, acento mexicano natural y auténtico.",
            Accent::Argentina => {
                "Español Rioplatense (Argentina), entonación característica y sheísmo marcado."
            }
            Accent::Peru => "Español de Perú, acento limeño neutro, claro y pausado.",
            Accent::Colombia => {
                "Español de Colombia, acento colombiano (bogotano/paisa) con entonación melódica."
            }
        }
    }
}

impl fmt::Display for Accent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Accent {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "spain" | "españa" | "espana" | "es" => Ok(Accent::Spain),
            "mexico" | "méxico" | "mx" => Ok(Accent::Mexico),
            "argentina" | "ar" => Ok(Accent::Argentina),
            "peru" | "perú" | "pe" => Ok(Accent::Peru),
            "colombia" | "co" => Ok(Accent::Colombia),
            _ => Err(ParseOptionError {
                kind: "accent",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    #[default]
    Natural,
    Joyful,
    Sad,
    Whisper,
    Storyteller,
}

impl Style {
    pub const ALL: [Style; 5] = [
        Style::Natural,
        Style::Joyful,
        Style::Sad,
        Style::Whisper,
        Style::Storyteller,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Style::Natural => "Natural",
            Style::Joyful => "Alegre",
            Style::Sad => "Triste",
            Style::Whisper => "Susurrar",
            Style::Storyteller => "Storyteller",
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Style {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "natural" => Ok(Style::Natural),
            "joyful" | "alegre" => Ok(Style::Joyful),
            "sad" | "triste" => Ok(Style::Sad),
            "whisper" | "susurrar" => Ok(Style::Whisper),
            "storyteller" => Ok(Style::Storyteller),
            _ => Err(ParseOptionError {
                kind: "style",
                value: s.to_string(),
            }),
        }
    }
}

/// Inline markup understood by the prompt.
pub const TAG_PAUSE: &str = "[pausa]";
pub const TAG_LAUGH: &str = "[risa]";
pub const TAG_SHOUT: &str = "[grito]";
pub const TAG_CRY: &str = "[llanto]";
pub const TAGS: [&str; 4] = [TAG_PAUSE, TAG_LAUGH, TAG_SHOUT, TAG_CRY];

/// Look up a markup tag by bare name (`risa`) or in brackets (`[risa]`).
pub fn find_tag(name: &str) -> Option<&'static str> {
    let name = name.trim();
    let bare = name
        .strip_prefix('[')
        .and_then(|n| n.strip_suffix(']'))
        .unwrap_or(name);
    TAGS.iter()
        .copied()
        .find(|tag| tag[1..tag.len() - 1].eq_ignore_ascii_case(bare))
}

/// Append a markup tag, padded with spaces.
pub fn insert_tag(text: &mut String, tag: &str) {
    text.push(' ');
    text.push_str(tag);
    text.push(' ');
}
