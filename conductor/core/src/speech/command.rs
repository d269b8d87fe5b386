//! Command-line Speech Engine
//!
//! Speaks by launching an external synthesizer (`espeak-ng` by default) for
//! each utterance:
//!
//! ```text
//! espeak-ng -v <voice> -s <words-per-minute> <text>
//! ```
//!
//! The child is killed when the utterance is cancelled or superseded.

use std::process::Stdio;

use tokio::process::Command;
use tokio::sync::oneshot;

use super::engine::{Locale, SpeechEngine, SpeechError, SpeechEvent, SpeechSink, Utterance};

/// Default synthesizer program
pub const DEFAULT_SPEECH_PROGRAM: &str = "espeak-ng";

/// espeak-ng's normal speaking rate in words per minute
const NORMAL_WPM: f32 = 175.0;

/// Speech engine backed by an external synthesizer process
pub struct CommandSpeechEngine {
    /// Program to launch
    program: String,
    /// Voice used for zh-CN text
    chinese_voice: String,
    /// Voice used for en-US text
    english_voice: String,
    /// Whether the program was found on PATH
    available: bool,
    /// Cancels the running child, if any
    active: Option<oneshot::Sender<()>>,
}

impl CommandSpeechEngine {
    /// Create an engine, probing PATH for `program`
    pub fn new(
        program: impl Into<String>,
        chinese_voice: impl Into<String>,
        english_voice: impl Into<String>,
    ) -> Self {
        let program = program.into();
        let available = which::which(&program).is_ok();
        if !available {
            tracing::warn!(program = %program, "Speech synthesizer not found; speech disabled");
        }

        Self {
            program,
            chinese_voice: chinese_voice.into(),
            english_voice: english_voice.into(),
            available,
            active: None,
        }
    }

    /// Synthesizer arguments for an utterance
    fn args(&self, utterance: &Utterance) -> Vec<String> {
        let voice = match utterance.locale {
            Locale::ZhCn => &self.chinese_voice,
            Locale::EnUs => &self.english_voice,
        };
        vec![
            "-v".to_string(),
            voice.clone(),
            "-s".to_string(),
            words_per_minute(utterance.rate).to_string(),
            utterance.text.clone(),
        ]
    }
}

/// Convert a relative rate to espeak-ng words per minute
fn words_per_minute(rate: f32) -> u32 {
    // espeak-ng accepts 80..=450
    (NORMAL_WPM * rate).round().clamp(80.0, 450.0) as u32
}

impl SpeechEngine for CommandSpeechEngine {
    fn is_available(&self) -> bool {
        self.available
    }

    fn cancel(&mut self) {
        if let Some(cancel) = self.active.take() {
            let _ = cancel.send(());
        }
    }

    fn speak(&mut self, utterance: Utterance, sink: SpeechSink) -> Result<(), SpeechError> {
        if !self.available {
            return Err(SpeechError::Unavailable);
        }
        self.cancel();

        let mut child = Command::new(&self.program)
            .args(self.args(&utterance))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| SpeechError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        let id = utterance.id;
        let (cancel_tx, cancel_rx) = oneshot::channel();
        self.active = Some(cancel_tx);
        let _ = sink.send(SpeechEvent::Started { id });

        tokio::spawn(async move {
            tokio::select! {
                status = child.wait() => {
                    let event = match status {
                        Ok(status) if status.success() => SpeechEvent::Ended { id },
                        Ok(status) => SpeechEvent::Failed {
                            id,
                            error: format!("synthesizer exited with {status}"),
                        },
                        Err(e) => SpeechEvent::Failed { id, error: e.to_string() },
                    };
                    let _ = sink.send(event);
                }
                _ = cancel_rx => {
                    if let Err(e) = child.kill().await {
                        tracing::debug!(error = %e, "Synthesizer already exited");
                    }
                }
            }
        });

        Ok(())
    }
}

impl Drop for CommandSpeechEngine {
    fn drop(&mut self) {
        self.cancel();
    }
}
