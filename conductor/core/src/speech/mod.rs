//! Text-to-Speech
//!
//! Read-aloud support for the metadata panel: the character, the example
//! sentence, and its English translation.
//!
//! - [`SpeechTrigger`] keeps at most one utterance alive and tracks which
//!   control is playing
//! - [`SpeechEngine`] is the platform capability; [`CommandSpeechEngine`]
//!   drives an external synthesizer and [`SilentSpeechEngine`] stands in when
//!   speech is disabled

mod command;
mod engine;
mod trigger;

pub use command::{CommandSpeechEngine, DEFAULT_SPEECH_PROGRAM};
pub use engine::{
    Locale, SilentSpeechEngine, SpeechEngine, SpeechError, SpeechEvent, SpeechSink, Utterance,
    UtteranceId,
};
pub use trigger::{SpeechKey, SpeechTrigger, DEFAULT_SPEECH_RATE};

/// Speech settings
#[derive(Clone, Debug, PartialEq)]
pub struct SpeechConfig {
    /// Whether to speak at all
    pub enabled: bool,
    /// Synthesizer program
    pub program: String,
    /// Speaking rate relative to normal
    pub rate: f32,
    /// Synthesizer voice for Chinese text
    pub chinese_voice: String,
    /// Synthesizer voice for English text
    pub english_voice: String,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            program: DEFAULT_SPEECH_PROGRAM.to_string(),
            rate: DEFAULT_SPEECH_RATE,
            chinese_voice: "cmn".to_string(),
            english_voice: "en-us".to_string(),
        }
    }
}

impl SpeechConfig {
    /// Build the configured engine
    #[must_use]
    pub fn build(&self) -> Box<dyn SpeechEngine> {
        if self.enabled {
            Box::new(CommandSpeechEngine::new(
                self.program.clone(),
                self.chinese_voice.clone(),
                self.english_voice.clone(),
            ))
        } else {
            Box::new(SilentSpeechEngine)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_builds_silent_engine() {
        let config = SpeechConfig {
            enabled: false,
            ..Default::default()
        };
        assert!(!config.build().is_available());
    }

    #[test]
    fn test_defaults() {
        let config = SpeechConfig::default();
        assert_eq!(config.program, "espeak-ng");
        assert!((config.rate - 0.8).abs() < f32::EPSILON);
    }
}
