//! Conductor - The Application Shell
//!
//! The Conductor owns the practice session. It:
//! - Validates character input
//! - Runs the metadata fetch lifecycle (Idle → Loading → Success/Error)
//! - Drives the board through character and mode changes
//! - Routes speech requests to the single-utterance speech trigger
//! - Publishes everything a surface renders as `ConductorMessage`s
//!
//! # Design Philosophy
//!
//! The Conductor is UI-agnostic. It doesn't know or care whether it's talking to
//! a TUI or a test harness. It communicates through:
//! - `ConductorMessage`: Commands sent TO the UI surface
//! - `SurfaceEvent`: Events received FROM the UI surface
//!
//! # Last Request Wins
//!
//! Every accepted character bumps a request generation. Fetches run as spawned
//! tasks and report back tagged with the generation and character they were
//! started for; a result that no longer matches the active request is dropped,
//! whatever order the results arrive in.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;

use crate::backend::{BackendError, MetadataBackend};
use crate::board::{
    BoardController, BoardOutcome, StatusText, WidgetEvent, WidgetFactory, WidgetOptions,
};
use crate::character::{Character, INVALID_CHARACTER_NOTICE};
use crate::config::DEFAULT_FETCH_TIMEOUT;
use crate::events::{SurfaceEvent, SurfaceType};
use crate::messages::{ConductorMessage, EventId, LoadState, Mode, NotifyLevel};
use crate::metadata::CharacterMetadata;
use crate::speech::{SpeechEngine, SpeechEvent, SpeechKey, SpeechTrigger, DEFAULT_SPEECH_RATE};

/// Conductor configuration
#[derive(Clone, Debug, PartialEq)]
pub struct ConductorConfig {
    /// Character loaded when a surface connects
    pub default_character: Character,
    /// Whether to load the default character on connect
    pub load_on_connect: bool,
    /// Upper bound on a single metadata fetch
    pub fetch_timeout: Duration,
    /// Options passed to the stroke widget factory
    pub widget_options: WidgetOptions,
    /// Speaking rate relative to normal
    pub speech_rate: f32,
}

impl Default for ConductorConfig {
    fn default() -> Self {
        Self {
            default_character: Character::default(),
            load_on_connect: true,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            widget_options: WidgetOptions::default(),
            speech_rate: DEFAULT_SPEECH_RATE,
        }
    }
}

/// Result of one spawned fetch
#[derive(Debug)]
struct FetchOutcome {
    /// Request generation the fetch was started for
    generation: u64,
    /// Character the fetch was started for
    character: Character,
    result: Result<CharacterMetadata, BackendError>,
}

/// The Conductor - headless application shell
pub struct Conductor<B: MetadataBackend> {
    /// Configuration
    config: ConductorConfig,
    /// Metadata backend
    backend: Arc<B>,
    /// Board controller (owns the stroke widget)
    board: BoardController,
    /// Speech trigger
    speech: SpeechTrigger,
    /// Channel to send messages to UI surface
    tx: mpsc::Sender<ConductorMessage>,
    /// Connected surface
    surface_type: Option<SurfaceType>,

    /// Active character
    character: Option<Character>,
    /// Metadata for the active character
    metadata: Option<CharacterMetadata>,
    /// Fetch lifecycle state
    load_state: LoadState,
    /// Board mode
    mode: Mode,

    /// Generation of the active request
    generation: u64,
    /// Fetches spawned but not yet received
    in_flight: usize,
    fetch_tx: mpsc::UnboundedSender<FetchOutcome>,
    fetch_rx: mpsc::UnboundedReceiver<FetchOutcome>,
    health_tx: mpsc::UnboundedSender<bool>,
    health_rx: mpsc::UnboundedReceiver<bool>,
    widget_rx: mpsc::UnboundedReceiver<WidgetEvent>,
    speech_rx: mpsc::UnboundedReceiver<SpeechEvent>,

    /// Last board status published to the surface
    published_status: Option<StatusText>,
    /// Last playing key published to the surface
    published_speaking: Option<SpeechKey>,
}

impl<B: MetadataBackend + 'static> Conductor<B> {
    /// Create a new Conductor
    ///
    /// The widget factory and speech engine are the surface's rendering and
    /// audio capabilities.
    pub fn new(
        backend: B,
        config: ConductorConfig,
        widgets: Box<dyn WidgetFactory>,
        speech_engine: Box<dyn SpeechEngine>,
        tx: mpsc::Sender<ConductorMessage>,
    ) -> Self {
        let (fetch_tx, fetch_rx) = mpsc::unbounded_channel();
        let (health_tx, health_rx) = mpsc::unbounded_channel();
        let (widget_tx, widget_rx) = mpsc::unbounded_channel();
        let (speech_tx, speech_rx) = mpsc::unbounded_channel();

        let board = BoardController::new(widgets, config.widget_options.clone(), widget_tx);
        let speech = SpeechTrigger::new(speech_engine, speech_tx).with_rate(config.speech_rate);

        Self {
            config,
            backend: Arc::new(backend),
            board,
            speech,
            tx,
            surface_type: None,
            character: None,
            metadata: None,
            load_state: LoadState::Idle,
            mode: Mode::Demonstration,
            generation: 0,
            in_flight: 0,
            fetch_tx,
            fetch_rx,
            health_tx,
            health_rx,
            widget_rx,
            speech_rx,
            published_status: None,
            published_speaking: None,
        }
    }

    /// Fetch lifecycle state
    pub fn load_state(&self) -> LoadState {
        self.load_state
    }

    /// Board mode
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Active character
    pub fn character(&self) -> Option<Character> {
        self.character
    }

    /// Metadata for the active character
    pub fn metadata(&self) -> Option<&CharacterMetadata> {
        self.metadata.as_ref()
    }

    /// Board status line
    pub fn board_status(&self) -> StatusText {
        self.board.status()
    }

    /// Board controller (read-only)
    pub fn board(&self) -> &BoardController {
        &self.board
    }

    /// Speech control currently playing
    pub fn playing_key(&self) -> Option<SpeechKey> {
        self.speech.playing_key()
    }

    /// Name of the metadata backend
    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    /// Connected surface type
    pub fn surface_type(&self) -> Option<&SurfaceType> {
        self.surface_type.as_ref()
    }

    /// Number of fetches that have not reported back yet
    pub fn pending_fetches(&self) -> usize {
        self.in_flight
    }

    /// Start the Conductor
    ///
    /// The backend health check runs in the background; an unreachable
    /// service is reported as a warning from [`poll`](Self::poll).
    pub async fn start(&mut self) -> anyhow::Result<()> {
        tracing::info!(backend = self.backend.name(), "Starting conductor");

        let backend = Arc::clone(&self.backend);
        let tx = self.health_tx.clone();
        tokio::spawn(async move {
            let _ = tx.send(backend.health_check().await);
        });

        self.send(ConductorMessage::State {
            state: self.load_state,
        })
        .await;

        Ok(())
    }

    /// Handle an event from the UI surface
    pub async fn handle_event(&mut self, event: SurfaceEvent) -> anyhow::Result<()> {
        match event {
            SurfaceEvent::Connected {
                event_id,
                surface_type,
            } => {
                tracing::debug!(surface = surface_type.name(), "Surface connected");
                self.surface_type = Some(surface_type);
                self.ack(event_id).await;
                self.send_snapshot().await;

                if self.config.load_on_connect && self.character.is_none() {
                    self.select_character(self.config.default_character).await;
                }
            }

            SurfaceEvent::Submit { event_id, input } => {
                self.ack(event_id).await;
                match Character::from_input(&input) {
                    Ok(character) => self.select_character(character).await,
                    Err(e) => {
                        tracing::warn!(input = %input, reason = %e, "Rejected character input");
                        self.notify(NotifyLevel::Warning, INVALID_CHARACTER_NOTICE)
                            .await;
                    }
                }
            }

            SurfaceEvent::ModeSelected { event_id, mode } => {
                self.ack(event_id).await;
                self.set_mode(mode).await;
            }

            SurfaceEvent::Speak { event_id, key } => {
                self.ack(event_id).await;
                self.speak(key).await;
            }

            SurfaceEvent::QuitRequested { event_id } => {
                self.ack(event_id).await;
                self.shutdown().await?;
            }
        }

        Ok(())
    }

    /// Apply completed fetches, widget callbacks, and speech progress
    ///
    /// Must be called regularly (once per surface frame). Returns true if
    /// anything was applied.
    pub async fn poll(&mut self) -> bool {
        let mut applied = false;

        while let Ok(healthy) = self.health_rx.try_recv() {
            if !healthy {
                tracing::warn!(backend = self.backend.name(), "Metadata service unreachable");
                self.notify(
                    NotifyLevel::Warning,
                    "Metadata service not reachable - character info may fail to load",
                )
                .await;
            }
            applied = true;
        }

        while let Ok(outcome) = self.fetch_rx.try_recv() {
            self.apply_fetch(outcome).await;
            applied = true;
        }

        while let Ok(event) = self.widget_rx.try_recv() {
            self.apply_widget_event(event).await;
            applied = true;
        }

        while let Ok(event) = self.speech_rx.try_recv() {
            self.speech.handle_event(event);
            applied = true;
        }

        self.publish_board().await;
        self.publish_speaking().await;
        applied
    }

    /// Wait for every spawned fetch to report back, applying each
    ///
    /// Stale results are received and dropped like in [`poll`](Self::poll).
    pub async fn settle_fetches(&mut self) {
        while self.in_flight > 0 {
            match self.fetch_rx.recv().await {
                Some(outcome) => self.apply_fetch(outcome).await,
                None => break,
            }
        }
        self.publish_board().await;
    }

    /// Accept a validated character and start loading it
    async fn select_character(&mut self, character: Character) {
        self.generation += 1;
        tracing::info!(character = %character, generation = self.generation, "Loading character");

        self.character = Some(character);
        self.send(ConductorMessage::CharacterChanged { character })
            .await;

        if self.metadata.take().is_some() {
            self.send(ConductorMessage::Metadata { metadata: None }).await;
        }

        self.mode = Mode::Demonstration;
        self.send(ConductorMessage::Mode { mode: self.mode }).await;
        self.board.set_character(character, self.mode);
        self.publish_board().await;

        self.set_state(LoadState::Loading).await;
        self.spawn_fetch(self.generation, character);
    }

    /// Run a fetch on a background task
    fn spawn_fetch(&mut self, generation: u64, character: Character) {
        let backend = Arc::clone(&self.backend);
        let tx = self.fetch_tx.clone();
        let timeout = self.config.fetch_timeout;
        self.in_flight += 1;

        tokio::spawn(async move {
            let result = match tokio::time::timeout(timeout, backend.fetch(character)).await {
                Ok(result) => result,
                Err(_) => Err(BackendError::Timeout(timeout)),
            };
            let _ = tx.send(FetchOutcome {
                generation,
                character,
                result,
            });
        });
    }

    /// Apply a fetch result if it still belongs to the active request
    async fn apply_fetch(&mut self, outcome: FetchOutcome) {
        self.in_flight = self.in_flight.saturating_sub(1);

        if outcome.generation != self.generation || Some(outcome.character) != self.character {
            tracing::debug!(
                character = %outcome.character,
                generation = outcome.generation,
                active = self.generation,
                "Discarding stale metadata response"
            );
            return;
        }

        match outcome.result {
            Ok(metadata) => {
                tracing::info!(character = %outcome.character, "Metadata loaded");
                self.metadata = Some(metadata.clone());
                self.send(ConductorMessage::Metadata {
                    metadata: Some(metadata),
                })
                .await;
                self.set_state(LoadState::Success).await;
                self.set_mode(Mode::Demonstration).await;
            }
            Err(e) => {
                tracing::warn!(character = %outcome.character, error = %e, "Metadata fetch failed");
                if self.metadata.take().is_some() {
                    self.send(ConductorMessage::Metadata { metadata: None }).await;
                }
                self.set_state(LoadState::Error).await;
                self.send(ConductorMessage::Notify {
                    level: NotifyLevel::Error,
                    title: Some("Could not load character info".to_string()),
                    message: e.to_string(),
                })
                .await;
            }
        }
    }

    /// Route a widget callback through the board
    async fn apply_widget_event(&mut self, event: WidgetEvent) {
        if let Some(BoardOutcome::RequestMode(mode)) = self.board.handle_widget_event(event) {
            self.set_mode(mode).await;
        }
    }

    /// Change the board mode
    ///
    /// The same mode is a no-op, and so is any change while the board has no
    /// widget (nothing loaded yet, or creation failed).
    async fn set_mode(&mut self, mode: Mode) {
        if self.mode == mode {
            return;
        }
        if self.board.mode().is_none() {
            tracing::debug!(?mode, board = ?self.board.state(), "Ignoring mode change without a widget");
            return;
        }
        tracing::debug!(from = ?self.mode, to = ?mode, "Mode change");
        self.mode = mode;
        self.board.set_mode(mode);
        self.send(ConductorMessage::Mode { mode }).await;
        self.publish_board().await;
    }

    /// Read a metadata field aloud (or stop it)
    async fn speak(&mut self, key: SpeechKey) {
        let Some(metadata) = self.metadata.as_ref() else {
            tracing::debug!(?key, "No metadata to speak");
            return;
        };

        let text = match key {
            SpeechKey::Character => metadata.character.to_string(),
            SpeechKey::Sentence => metadata.example_sentence.clone(),
            SpeechKey::Translation => metadata.example_translation.clone(),
        };
        self.speech.speak(&text, key, key.locale());
        self.publish_speaking().await;
    }

    /// Shut down the Conductor
    pub async fn shutdown(&mut self) -> anyhow::Result<()> {
        tracing::info!("Conductor shutting down");
        self.speech.stop();
        self.publish_speaking().await;

        self.send(ConductorMessage::Quit {
            message: Some("再见！Goodbye!".to_string()),
        })
        .await;

        Ok(())
    }

    /// Send the full current state to a newly connected surface
    async fn send_snapshot(&mut self) {
        if let Some(character) = self.character {
            self.send(ConductorMessage::CharacterChanged { character })
                .await;
        }
        self.send(ConductorMessage::State {
            state: self.load_state,
        })
        .await;
        self.send(ConductorMessage::Metadata {
            metadata: self.metadata.clone(),
        })
        .await;
        self.send(ConductorMessage::Mode { mode: self.mode }).await;

        self.published_status = None;
        self.publish_board().await;
        self.send(ConductorMessage::Speaking {
            key: self.speech.playing_key(),
        })
        .await;
    }

    /// Publish the board status line if it changed
    async fn publish_board(&mut self) {
        let status = self.board.status();
        if self.published_status != Some(status) {
            self.published_status = Some(status);
            self.send(ConductorMessage::BoardStatus { status }).await;
        }
    }

    /// Publish the playing key if it changed
    async fn publish_speaking(&mut self) {
        let key = self.speech.playing_key();
        if self.published_speaking != key {
            self.published_speaking = key;
            self.send(ConductorMessage::Speaking { key }).await;
        }
    }

    /// Set load state and notify UI
    async fn set_state(&mut self, state: LoadState) {
        self.load_state = state;
        self.send(ConductorMessage::State { state }).await;
    }

    /// Send acknowledgment
    async fn ack(&self, event_id: EventId) {
        self.send(ConductorMessage::Ack { event_id }).await;
    }

    /// Send notification
    async fn notify(&self, level: NotifyLevel, message: &str) {
        self.send(ConductorMessage::Notify {
            level,
            title: None,
            message: message.to_string(),
        })
        .await;
    }

    /// Send a message to the UI surface
    async fn send(&self, msg: ConductorMessage) {
        if let Err(e) = self.tx.send(msg).await {
            tracing::warn!("Failed to send message to surface: {}", e);
        }
    }
}
