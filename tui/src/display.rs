//! Display State Types
//!
//! Types that represent the current display state for the TUI.
//! These are derived from ConductorMessages and used for rendering.
//!
//! # Design Philosophy
//!
//! The TUI is a "thin client" - it just renders what the Conductor tells it to.
//! Display state is the bridge between ConductorMessages and rendering:
//!
//! - the active character and its metadata panel
//! - the fetch lifecycle (drives the spinner and loading panel)
//! - the board's mode badge and status line
//! - which speech control is playing
//! - the current notice, if any

use std::time::Duration;

use hanzi_conductor::{
    Character, CharacterMetadata, ConductorMessage, LoadState, Mode, NotifyLevel, SpeechKey,
    StatusText,
};

/// How long a notice stays on screen
pub const NOTIFICATION_TTL: Duration = Duration::from_secs(6);

/// A notification to display
#[derive(Clone, Debug, PartialEq)]
pub struct DisplayNotification {
    /// Notification level
    pub level: NotifyLevel,
    /// Optional title
    pub title: Option<String>,
    /// Message content
    pub message: String,
    /// Time on screen so far
    pub age: Duration,
}

impl DisplayNotification {
    /// Single line for the notice bar
    pub fn line(&self) -> String {
        match &self.title {
            Some(title) => format!("{title}: {}", self.message),
            None => self.message.clone(),
        }
    }
}

/// Everything the TUI draws, as last told by the Conductor
#[derive(Clone, Debug, Default)]
pub struct DisplayState {
    /// Active character
    pub character: Option<Character>,
    /// Metadata panel contents
    pub metadata: Option<CharacterMetadata>,
    /// Fetch lifecycle state
    pub load_state: LoadState,
    /// Board mode
    pub mode: Mode,
    /// Board status line
    pub board_status: StatusText,
    /// Speech control currently playing
    pub speaking: Option<SpeechKey>,
    /// Pending notification (if any)
    pub notification: Option<DisplayNotification>,
    /// Farewell from the Conductor
    pub goodbye: Option<String>,
    /// The Conductor has shut down
    pub quit: bool,
}

impl DisplayState {
    /// Create a new display state
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a ConductorMessage to update display state
    pub fn apply_message(&mut self, msg: ConductorMessage) {
        match msg {
            ConductorMessage::CharacterChanged { character } => {
                self.character = Some(character);
            }
            ConductorMessage::Metadata { metadata } => {
                self.metadata = metadata;
            }
            ConductorMessage::State { state } => {
                self.load_state = state;
            }
            ConductorMessage::Mode { mode } => {
                self.mode = mode;
            }
            ConductorMessage::BoardStatus { status } => {
                self.board_status = status;
            }
            ConductorMessage::Speaking { key } => {
                self.speaking = key;
            }
            ConductorMessage::Notify {
                level,
                title,
                message,
            } => {
                self.notification = Some(DisplayNotification {
                    level,
                    title,
                    message,
                    age: Duration::ZERO,
                });
            }
            ConductorMessage::Quit { message } => {
                self.goodbye = message;
                self.quit = true;
            }
            ConductorMessage::Ack { .. } => {
                // No display state change needed
            }
        }
    }

    /// Update timers
    pub fn update(&mut self, delta: Duration) {
        if let Some(notification) = self.notification.as_mut() {
            notification.age += delta;
            if notification.age >= NOTIFICATION_TTL {
                self.notification = None;
            }
        }
    }

    /// Whether a fetch is in flight
    pub fn is_loading(&self) -> bool {
        self.load_state.is_loading()
    }

    /// Whether `key`'s speech control is playing
    pub fn is_speaking(&self, key: SpeechKey) -> bool {
        self.speaking == Some(key)
    }

    /// Clear the notification
    pub fn clear_notification(&mut self) {
        self.notification = None;
    }
}
