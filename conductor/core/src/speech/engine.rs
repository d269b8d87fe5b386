//! Speech Engine Contract
//!
//! Platform text-to-speech is reached through [`SpeechEngine`]. Engines report
//! progress for each [`Utterance`] as [`SpeechEvent`]s tagged with the
//! utterance id, so the trigger can ignore events from utterances it has
//! already moved past.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::mpsc;

/// Channel end an engine reports progress on
pub type SpeechSink = mpsc::UnboundedSender<SpeechEvent>;

/// Identifier of one speak request
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UtteranceId(pub u64);

/// Spoken language of an utterance
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Locale {
    /// Mandarin Chinese (zh-CN)
    ZhCn,
    /// American English (en-US)
    EnUs,
}

impl Locale {
    /// BCP-47 tag
    #[must_use]
    pub fn tag(&self) -> &'static str {
        match self {
            Self::ZhCn => "zh-CN",
            Self::EnUs => "en-US",
        }
    }
}

/// A request to read some text aloud
#[derive(Clone, Debug, PartialEq)]
pub struct Utterance {
    /// Request id echoed in every [`SpeechEvent`]
    pub id: UtteranceId,
    /// Text to speak
    pub text: String,
    /// Language to speak it in
    pub locale: Locale,
    /// Speaking rate relative to normal (1.0)
    pub rate: f32,
}

/// Progress reported by an engine
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpeechEvent {
    /// Audio started playing
    Started {
        /// Utterance this event belongs to
        id: UtteranceId,
    },
    /// Playback finished normally
    Ended {
        /// Utterance this event belongs to
        id: UtteranceId,
    },
    /// Playback failed part way
    Failed {
        /// Utterance this event belongs to
        id: UtteranceId,
        /// What went wrong
        error: String,
    },
}

impl SpeechEvent {
    /// Utterance this event belongs to
    #[must_use]
    pub fn id(&self) -> UtteranceId {
        match self {
            Self::Started { id } | Self::Ended { id } | Self::Failed { id, .. } => *id,
        }
    }
}

/// A speak request could not be started
#[derive(Debug, Error)]
pub enum SpeechError {
    /// No speech capability on this system
    #[error("speech synthesis is not available")]
    Unavailable,

    /// The synthesizer process failed to start
    #[error("failed to start '{program}': {source}")]
    Spawn {
        /// Program that was launched
        program: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Text-to-speech capability
pub trait SpeechEngine: Send {
    /// Whether speech can be produced at all
    fn is_available(&self) -> bool;

    /// Stop anything queued or playing (no events are reported for it)
    fn cancel(&mut self);

    /// Start speaking `utterance`, reporting progress on `sink`
    ///
    /// # Errors
    ///
    /// Returns [`SpeechError`] when playback could not be started.
    fn speak(&mut self, utterance: Utterance, sink: SpeechSink) -> Result<(), SpeechError>;
}

/// Engine for systems without speech synthesis
#[derive(Clone, Copy, Debug, Default)]
pub struct SilentSpeechEngine;

impl SpeechEngine for SilentSpeechEngine {
    fn is_available(&self) -> bool {
        false
    }

    fn cancel(&mut self) {}

    fn speak(&mut self, _utterance: Utterance, _sink: SpeechSink) -> Result<(), SpeechError> {
        Err(SpeechError::Unavailable)
    }
}
