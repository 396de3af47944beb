use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::{Accent, Style};

/// Upper bound on words per generation request.
pub const MAX_WORDS: usize = 15_000;
pub const MIN_SPEED: f32 = 0.5;
pub const MAX_SPEED: f32 = 2.0;
pub const MIN_PITCH: i8 = -10;
pub const MAX_PITCH: i8 = 10;
/// Speed slider positions.
pub const SPEED_SCALE_MIN: i8 = -10;
pub const SPEED_SCALE_MAX: i8 = 10;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RequestError {
    #[error("no text to synthesize")]
    EmptyText,

    #[error("text has {count} words, above the {limit}-word limit")]
    TooManyWords { count: usize, limit: usize },

    #[error("speed {0} outside [0.5, 2.0]")]
    SpeedOutOfRange(f32),

    #[error("pitch {0} outside [-10, 10]")]
    PitchOutOfRange(i8),
}

/// Everything the user picked for one generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationSettings {
    pub text: String,
    pub voice_id: String,
    pub accent: Accent,
    pub style: Style,
    /// 0.5 (slowest) to 2.0 (fastest), 1.0 is natural.
    pub speed: f32,
    /// -10 to 10, 0 is the voice's natural pitch.
    pub pitch: i8,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            text: String::new(),
            voice_id: "f1".to_string(),
            accent: Accent::default(),
            style: Style::default(),
            speed: 1.0,
            pitch: 0,
        }
    }
}

impl GenerationSettings {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn word_count(&self) -> usize {
        word_count(&self.text)
    }

    pub fn validate(&self) -> Result<(), RequestError> {
        if self.text.trim().is_empty() {
            return Err(RequestError::EmptyText);
        }
        let count = self.word_count();
        if count > MAX_WORDS {
            return Err(RequestError::TooManyWords {
                count,
                limit: MAX_WORDS,
            });
        }
        if !(MIN_SPEED..=MAX_SPEED).contains(&self.speed) {
            return Err(RequestError::SpeedOutOfRange(self.speed));
        }
        if !(MIN_PITCH..=MAX_PITCH).contains(&self.pitch) {
            return Err(RequestError::PitchOutOfRange(self.pitch));
        }
        Ok(())
    }
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Map a -10..=10 slider position onto a speed factor.
///
/// The lower half spans 0.5..1.0 and the upper half 1.0..2.0, so the step
/// size differs on either side of the midpoint.
pub fn speed_from_ui_scale(position: i8) -> f32 {
    let position = position.clamp(SPEED_SCALE_MIN, SPEED_SCALE_MAX);
    match position {
        0 => 1.0,
        p if p < 0 => 1.0 + f32::from(p) / 20.0,
        p => 1.0 + f32::from(p) / 10.0,
    }
}

/// Inverse of [`speed_from_ui_scale`], rounded to the nearest slider step.
pub fn ui_scale_from_speed(speed: f32) -> i8 {
    let speed = speed.clamp(MIN_SPEED, MAX_SPEED);
    let position = if speed < 1.0 {
        ((speed - 1.0) * 20.0).round()
    } else {
        ((speed - 1.0) * 10.0).round()
    };
    position as i8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_ok() {
        let settings = GenerationSettings::new("Hola mundo");
        assert_eq!(settings.validate(), Ok(()));
    }

    #[test]
    fn test_validate_empty_text() {
        assert_eq!(
            GenerationSettings::new("  \n\t ").validate(),
            Err(RequestError::EmptyText)
        );
    }

    #[test]
    fn test_validate_word_limit() {
        let text = "palabra ".repeat(MAX_WORDS);
        assert_eq!(GenerationSettings::new(text.clone()).validate(), Ok(()));

        let text = format!("{text} extra");
        assert_eq!(
            GenerationSettings::new(text).validate(),
            Err(RequestError::TooManyWords {
                count: MAX_WORDS + 1,
                limit: MAX_WORDS
            })
        );
    }

    #[test]
    fn test_validate_ranges() {
        let mut settings = GenerationSettings::new("hola");
        settings.speed = 2.5;
        assert_eq!(settings.validate(), Err(RequestError::SpeedOutOfRange(2.5)));
        settings.speed = f32::NAN;
        assert!(matches!(
            settings.validate(),
            Err(RequestError::SpeedOutOfRange(_))
        ));
        settings.speed = 1.0;
        settings.pitch = -11;
        assert_eq!(settings.validate(), Err(RequestError::PitchOutOfRange(-11)));
    }

    #[test]
    fn test_speed_scale_mapping() {
        assert_eq!(speed_from_ui_scale(-10), 0.5);
        assert_eq!(speed_from_ui_scale(0), 1.0);
        assert_eq!(speed_from_ui_scale(10), 2.0);
        assert_eq!(speed_from_ui_scale(5), 1.5);
        assert_eq!(speed_from_ui_scale(-5), 0.75);
        assert_eq!(speed_from_ui_scale(42), 2.0);

        for p in SPEED_SCALE_MIN..=SPEED_SCALE_MAX {
            assert_eq!(ui_scale_from_speed(speed_from_ui_scale(p)), p);
        }
    }
}
