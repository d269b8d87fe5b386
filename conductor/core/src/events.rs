//! Surface Events
//!
//! Events sent from UI surfaces to the Conductor. These represent all the ways
//! a UI can report user actions to the practice board.
//!
//! # Design Philosophy
//!
//! UI surfaces are "dumb" renderers that forward user actions to the Conductor.
//! They don't validate input or decide what a key press means for the board -
//! they just report what happened. The Conductor decides how to respond.

use serde::{Deserialize, Serialize};

use crate::messages::{EventId, Mode};
use crate::speech::SpeechKey;

/// Events from UI Surface to Conductor
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum SurfaceEvent {
    // ============================================
    // Connection Events
    // ============================================
    /// Surface connected to Conductor
    Connected {
        /// Event ID for acknowledgment
        event_id: EventId,
        /// Surface type identifier
        surface_type: SurfaceType,
    },

    // ============================================
    // User Input Events
    // ============================================
    /// User submitted the character input (raw, unvalidated text)
    Submit {
        /// Event ID for acknowledgment
        event_id: EventId,
        /// The text as typed or pasted
        input: String,
    },

    /// User pressed one of the mode toggles
    ModeSelected {
        /// Event ID for acknowledgment
        event_id: EventId,
        /// Requested mode
        mode: Mode,
    },

    /// User pressed one of the speech controls
    Speak {
        /// Event ID for acknowledgment
        event_id: EventId,
        /// Which field to read aloud
        key: SpeechKey,
    },

    // ============================================
    // Lifecycle Events
    // ============================================
    /// User requested quit
    QuitRequested {
        /// Event ID for acknowledgment
        event_id: EventId,
    },
}

impl SurfaceEvent {
    /// Generate a new event ID for this event
    pub fn new_event_id() -> EventId {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        let id = COUNTER.fetch_add(1, Ordering::SeqCst);
        EventId(format!("evt_{id}"))
    }

    /// Get the event ID
    pub fn event_id(&self) -> &EventId {
        match self {
            Self::Connected { event_id, .. }
            | Self::Submit { event_id, .. }
            | Self::ModeSelected { event_id, .. }
            | Self::Speak { event_id, .. }
            | Self::QuitRequested { event_id } => event_id,
        }
    }
}

/// Type of UI surface
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SurfaceType {
    /// Terminal UI (ratatui/crossterm)
    Tui,
    /// Headless (for testing/automation)
    Headless,
    /// Custom surface type
    Custom(String),
}

impl SurfaceType {
    /// Human-readable name
    pub fn name(&self) -> &str {
        match self {
            Self::Tui => "Terminal",
            Self::Headless => "Headless",
            Self::Custom(name) => name,
        }
    }
}
