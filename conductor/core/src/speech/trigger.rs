//! Speech Trigger
//!
//! Turns speech-button presses into engine calls while keeping at most one
//! utterance alive. Pressing the button that is currently speaking stops it;
//! pressing another button replaces it.

use serde::{Deserialize, Serialize};

use super::engine::{Locale, SpeechEngine, SpeechEvent, SpeechSink, Utterance, UtteranceId};

/// Speaking rate used for every utterance (slightly slower for clarity)
pub const DEFAULT_SPEECH_RATE: f32 = 0.8;

/// Which metadata field a speech control reads
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpeechKey {
    /// The character itself
    Character,
    /// The Chinese example sentence
    Sentence,
    /// The English translation
    Translation,
}

impl SpeechKey {
    /// Language the field is written in
    #[must_use]
    pub fn locale(&self) -> Locale {
        match self {
            Self::Character | Self::Sentence => Locale::ZhCn,
            Self::Translation => Locale::EnUs,
        }
    }

    /// Control label
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Character => "朗读发音",
            Self::Sentence => "朗读中文例句",
            Self::Translation => "Read English Translation",
        }
    }
}

/// The one utterance the trigger is tracking
#[derive(Clone, Copy, Debug)]
struct ActiveUtterance {
    id: UtteranceId,
    key: SpeechKey,
    started: bool,
}

/// Single-utterance speech controller
pub struct SpeechTrigger {
    engine: Box<dyn SpeechEngine>,
    /// Where the engine reports progress
    sink: SpeechSink,
    rate: f32,
    next_id: u64,
    current: Option<ActiveUtterance>,
}

impl SpeechTrigger {
    /// Create a trigger over `engine`
    pub fn new(engine: Box<dyn SpeechEngine>, sink: SpeechSink) -> Self {
        Self {
            engine,
            sink,
            rate: DEFAULT_SPEECH_RATE,
            next_id: 0,
            current: None,
        }
    }

    /// Override the speaking rate
    #[must_use]
    pub fn with_rate(mut self, rate: f32) -> Self {
        self.rate = rate;
        self
    }

    /// Whether the engine can speak at all
    pub fn is_available(&self) -> bool {
        self.engine.is_available()
    }

    /// Key of the utterance that is audibly playing
    pub fn playing_key(&self) -> Option<SpeechKey> {
        self.current.filter(|u| u.started).map(|u| u.key)
    }

    /// Speak `text` for `key`, or stop if `key` is already speaking
    pub fn speak(&mut self, text: &str, key: SpeechKey, locale: Locale) {
        if !self.engine.is_available() {
            tracing::warn!(?key, "Speech synthesis not supported on this system");
            return;
        }

        self.engine.cancel();

        if let Some(current) = self.current.take() {
            if current.key == key {
                tracing::debug!(?key, "Speech toggled off");
                return;
            }
        }

        self.next_id += 1;
        let id = UtteranceId(self.next_id);
        let utterance = Utterance {
            id,
            text: text.to_string(),
            locale,
            rate: self.rate,
        };

        match self.engine.speak(utterance, self.sink.clone()) {
            Ok(()) => {
                tracing::debug!(?key, id = id.0, locale = locale.tag(), "Speaking");
                self.current = Some(ActiveUtterance {
                    id,
                    key,
                    started: false,
                });
            }
            Err(e) => {
                tracing::warn!(?key, error = %e, "Speech failed to start");
            }
        }
    }

    /// Apply engine progress; events for other utterances are ignored
    pub fn handle_event(&mut self, event: SpeechEvent) {
        let Some(current) = self.current.as_mut() else {
            return;
        };
        if current.id != event.id() {
            tracing::debug!(?event, "Ignoring event for superseded utterance");
            return;
        }

        match event {
            SpeechEvent::Started { .. } => current.started = true,
            SpeechEvent::Ended { .. } => self.current = None,
            SpeechEvent::Failed { error, .. } => {
                tracing::warn!(key = ?current.key, error = %error, "Speech playback failed");
                self.current = None;
            }
        }
    }

    /// Stop any utterance
    pub fn stop(&mut self) {
        self.engine.cancel();
        self.current = None;
    }
}
