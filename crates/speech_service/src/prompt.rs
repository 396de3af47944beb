//! Natural-language instructions sent alongside the text.
//!
//! The model only takes a prebuilt voice name, so accent, style, speed and
//! pitch are expressed in prose. The ladders are fine-grained so that small
//! slider moves still change the wording.

use crate::catalog::VoiceOption;
use crate::request::GenerationSettings;

pub fn speed_instruction(speed: f32) -> &'static str {
    if speed <= 0.6 {
        "extremadamente lenta, arrastrando las palabras (slow motion)"
    } else if speed <= 0.8 {
        "muy lenta, pausada y deliberada"
    } else if speed < 1.0 {
        "un poco más lenta de lo normal, relajada"
    } else if speed == 1.0 {
        "velocidad de conversación natural y estándar"
    } else if speed <= 1.1 {
        "ligeramente animada y fluida"
    } else if speed <= 1.3 {
        "rápida, dinámica y ágil"
    } else if speed <= 1.6 {
        "muy rápida, apresurada y urgente"
    } else {
        "extremadamente rápida, casi frenética (fast paced)"
    }
}

pub fn pitch_instruction(pitch: i8) -> &'static str {
    match pitch {
        i8::MIN..=-8 => "tono extremadamente grave y profundo (sub-bass)",
        -7..=-5 => "tono muy grave y resonante",
        -4..=-1 => "tono ligeramente más grave de lo habitual",
        0 => "tono natural de la voz",
        1..=4 => "tono ligeramente más agudo y brillante",
        5..=7 => "tono agudo y juvenil",
        _ => "tono muy agudo y alto",
    }
}

/// Full prompt for one generation.
pub fn build_prompt(settings: &GenerationSettings, voice: &VoiceOption) -> String {
    format!(
        r#"Eres un actor de voz profesional. Tu tarea es leer el texto con las siguientes especificaciones EXACTAS.

CONFIGURACIÓN OBLIGATORIA:
1. IDIOMA Y ACENTO: {accent}. (Mantén este acento pase lo que pase).
2. ESTILO: {style}.
3. VELOCIDAD: {speed}. (Esta instrucción sobrescribe cualquier descripción base de la voz).
4. TONO: {pitch}.
5. VOZ BASE: {tone}.

INSTRUCCIONES DE FORMATO:
- [pausa]: Haz una pausa clara de 2 segundos.
- [risa]: Ríete o di la frase riendo.
- [grito]: Grita o exclama con mucha fuerza.
- [llanto]: Habla sollozando.

TEXTO A LEER:
"{text}""#,
        accent = settings.accent.instruction(),
        style = settings.style.label(),
        speed = speed_instruction(settings.speed),
        pitch = pitch_instruction(settings.pitch),
        tone = voice.base_tone,
        text = settings.text,
    )
}
