//! Hanzi Conductor - Headless Core for the Stroke-Order Practice Board
//!
//! This crate provides the application logic for practicing Chinese character
//! stroke order, completely independent of any UI framework. It can drive a
//! TUI or run headless for testing/automation.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                           UI Surface                             │
//! │   input line · board (StrokeWidget) · status · metadata panel    │
//! │                               │                                  │
//! │                       SurfaceEvent (up)                          │
//! │                     ConductorMessage (down)                      │
//! └───────────────────────────────┼──────────────────────────────────┘
//!                                 │
//! ┌───────────────────────────────┼──────────────────────────────────┐
//! │                        CONDUCTOR CORE                            │
//! │  ┌────────────────────────────┴───────────────────────────────┐  │
//! │  │                        Conductor                            │  │
//! │  │  ┌───────────┐  ┌─────────────────┐  ┌───────────────────┐ │  │
//! │  │  │ Character │  │ BoardController │  │  SpeechTrigger    │ │  │
//! │  │  │ validator │  │ (WidgetFactory) │  │  (SpeechEngine)   │ │  │
//! │  │  └───────────┘  └─────────────────┘  └───────────────────┘ │  │
//! │  │                 ┌─────────────────────────┐                │  │
//! │  │                 │ MetadataBackend (fetch) │                │  │
//! │  │                 └─────────────────────────┘                │  │
//! │  └─────────────────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Key Types
//!
//! - [`Conductor`]: The application shell that owns all state
//! - [`ConductorMessage`]: Messages sent from Conductor to UI surfaces
//! - [`SurfaceEvent`]: Events sent from UI surfaces to Conductor
//! - [`BoardController`]: Demonstration/quiz state machine over a stroke widget
//! - [`SpeechTrigger`]: Single-utterance text-to-speech control
//! - [`MetadataBackend`]: Source of pinyin, definition, and example sentence
//!
//! # Quick Start
//!
//! ```ignore
//! use hanzi_conductor::{
//!     load_config, Conductor, SurfaceEvent, SurfaceType,
//! };
//! use tokio::sync::mpsc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = load_config()?;
//!     let (tx, mut rx) = mpsc::channel(256);
//!
//!     let mut conductor = Conductor::new(
//!         config.backend_config().build(config.fetch_timeout),
//!         config.conductor_config(),
//!         Box::new(MyWidgetFactory),
//!         config.speech.build(),
//!         tx,
//!     );
//!     conductor.start().await?;
//!
//!     conductor.handle_event(SurfaceEvent::Connected {
//!         event_id: SurfaceEvent::new_event_id(),
//!         surface_type: SurfaceType::Headless,
//!     }).await?;
//!
//!     loop {
//!         conductor.poll().await;
//!         while let Ok(msg) = rx.try_recv() {
//!             // Render message to UI
//!         }
//!     }
//! }
//! ```
//!
//! # Module Overview
//!
//! - [`backend`]: Metadata backend abstraction (Gemini, offline fallback)
//! - [`board`]: Stroke widget contract and the board state machine
//! - [`character`]: Character input validation
//! - [`conductor`]: Main Conductor struct
//! - [`config`]: TOML/environment configuration
//! - [`events`]: Events from UI surfaces to Conductor
//! - [`messages`]: Messages from Conductor to UI surfaces
//! - [`metadata`]: Character metadata record
//! - [`speech`]: Text-to-speech trigger and engines
//!
//! # No TUI Dependencies
//!
//! This crate has **zero** dependencies on ratatui, crossterm, or any other
//! UI framework. Surfaces plug in their own stroke widget and speech engine.

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod backend;
pub mod board;
pub mod character;
pub mod conductor;
pub mod config;
pub mod events;
pub mod messages;
pub mod metadata;
pub mod speech;

// Re-exports for convenience
pub use backend::{
    BackendConfig, BackendError, GeminiBackend, MetadataBackend, OfflineBackend,
};
pub use board::{
    BoardController, BoardOutcome, BoardState, CallbackTicket, StatusText, StrokeWidget,
    WidgetError, WidgetEvent, WidgetFactory, WidgetOptions, WidgetSink,
};
pub use character::{Character, CharacterError, INVALID_CHARACTER_NOTICE};
pub use conductor::{Conductor, ConductorConfig};
pub use events::{SurfaceEvent, SurfaceType};
pub use messages::{ConductorMessage, EventId, LoadState, Mode, NotifyLevel};
pub use metadata::{CharacterMetadata, MetadataError};
pub use speech::{
    CommandSpeechEngine, Locale, SilentSpeechEngine, SpeechConfig, SpeechEngine, SpeechError,
    SpeechEvent, SpeechKey, SpeechSink, SpeechTrigger, Utterance, UtteranceId,
};

// Config exports
pub use config::{
    default_config_path, load_config, load_config_from_path, ConfigError, ConfigOverrides,
    ConfigSource, HanziConfig, HanziToml,
};
