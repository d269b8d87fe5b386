//! Conductor Messages
//!
//! Messages sent from the Conductor to UI surfaces. These are everything a
//! surface needs to draw the practice board: which character is active, the
//! fetch lifecycle, the metadata panel, the board's mode and status line, and
//! which speech button (if any) is playing.
//!
//! # Design Philosophy
//!
//! The Conductor owns all application state. Surfaces are pure renderers that
//! display what the Conductor tells them to, which keeps the state machine
//! testable without a terminal.

use serde::{Deserialize, Serialize};

use crate::board::StatusText;
use crate::character::Character;
use crate::metadata::CharacterMetadata;
use crate::speech::SpeechKey;

/// Messages from Conductor to UI Surface
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ConductorMessage {
    // ============================================
    // Character Messages
    // ============================================
    /// A new practice character was accepted
    CharacterChanged {
        /// The active character
        character: Character,
    },

    /// Metadata for the active character (None clears the panel)
    Metadata {
        /// Metadata to display
        metadata: Option<CharacterMetadata>,
    },

    /// Fetch lifecycle state change
    State {
        /// The new load state
        state: LoadState,
    },

    // ============================================
    // Board Messages
    // ============================================
    /// Board mode change
    Mode {
        /// The new mode
        mode: Mode,
    },

    /// Board status line change
    BoardStatus {
        /// Which status line to show
        status: StatusText,
    },

    // ============================================
    // Speech Messages
    // ============================================
    /// Which speech control is currently playing
    Speaking {
        /// Playing key, None when silent
        key: Option<SpeechKey>,
    },

    // ============================================
    // System Messages
    // ============================================
    /// System notification
    Notify {
        /// Notification level
        level: NotifyLevel,
        /// Title (optional)
        title: Option<String>,
        /// Message content
        message: String,
    },

    /// Acknowledgment of received event
    Ack {
        /// Event ID being acknowledged
        event_id: EventId,
    },

    /// Request surface to quit
    Quit {
        /// Optional goodbye message
        message: Option<String>,
    },
}

/// Event identifier (for acks)
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventId(pub String);

/// Notification levels
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotifyLevel {
    /// Informational
    Info,
    /// Warning
    Warning,
    /// Error
    Error,
    /// Success
    Success,
}

/// Board mode for the active character
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    /// Watch the stroke-order animation
    #[default]
    Demonstration,
    /// Trace the strokes and get scored
    Quiz,
}

impl Mode {
    /// Badge label shown above the board
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Demonstration => "演示模式",
            Self::Quiz => "描红模式",
        }
    }

    /// Label for the button that selects this mode
    #[must_use]
    pub fn action_label(&self) -> &'static str {
        match self {
            Self::Demonstration => "演示笔画",
            Self::Quiz => "开始描红",
        }
    }
}

/// Metadata fetch lifecycle
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadState {
    /// Nothing requested yet
    #[default]
    Idle,
    /// Waiting on the metadata backend
    Loading,
    /// Metadata for the active character is available
    Success,
    /// The last fetch failed or timed out
    Error,
}

impl LoadState {
    /// Human-readable description
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Loading => "Loading...",
            Self::Success => "Ready",
            Self::Error => "Error",
        }
    }

    /// Whether a fetch is in flight
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}
